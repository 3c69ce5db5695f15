//! Configuration management commands.

use clap::Subcommand;
use questline_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration as TOML
    Show,
    /// Update configuration values
    Set {
        /// Decomposition service base URL
        #[arg(long)]
        endpoint: Option<String>,
        /// Service model name
        #[arg(long)]
        model: Option<String>,
        /// Garden growth probability (0.0 - 1.0)
        #[arg(long)]
        growth_probability: Option<f64>,
    },
    /// Print the config file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Set {
            endpoint,
            model,
            growth_probability,
        } => {
            let mut config = Config::load()?;
            if let Some(e) = endpoint {
                config.gateway.endpoint = e;
            }
            if let Some(m) = model {
                config.gateway.model = m;
            }
            if let Some(p) = growth_probability {
                if !(0.0..=1.0).contains(&p) {
                    return Err("growth probability must be between 0.0 and 1.0".into());
                }
                config.garden.growth_probability = p;
            }
            config.save()?;
            println!("Configuration saved.");
        }
        ConfigAction::Path => {
            println!("{}", Config::default_path()?.display());
        }
    }
    Ok(())
}
