//! Focus timer commands.

use clap::Subcommand;

use crate::session::{print_events, Session};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Show the active quest and elapsed time
    Status,
    /// Pause the running timer
    Pause,
    /// Resume a paused timer
    Resume,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    match action {
        TimerAction::Status => {
            match session.app.state.active_quest_id.clone() {
                Some(id) => {
                    let task = session
                        .app
                        .state
                        .micro_task(&id)
                        .ok_or("Active quest not found in state")?;
                    let elapsed = session.app.timer_elapsed_ms();
                    let running = session.app.state.timer.is_running();
                    println!("Active quest: {} (~{} min)", task.title, task.duration_est_min);
                    println!(
                        "Elapsed: {}m{:02}s ({})",
                        elapsed / 60_000,
                        (elapsed % 60_000) / 1000,
                        if running { "running" } else { "paused" }
                    );
                }
                None => println!("No active quest. Start one with: questline quest start <id>"),
            }
        }
        TimerAction::Pause => {
            match session.app.pause_timer() {
                Some(event) => {
                    session.save()?;
                    print_events(&[event]);
                }
                None => println!("Timer is not running."),
            }
        }
        TimerAction::Resume => {
            match session.app.resume_timer() {
                Some(event) => {
                    session.save()?;
                    print_events(&[event]);
                }
                None => println!("Timer is already running."),
            }
        }
    }
    Ok(())
}
