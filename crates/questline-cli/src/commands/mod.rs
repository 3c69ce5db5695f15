pub mod auth;
pub mod config;
pub mod daily;
pub mod data;
pub mod friends;
pub mod profile;
pub mod quest;
pub mod reflect;
pub mod shop;
pub mod timer;
