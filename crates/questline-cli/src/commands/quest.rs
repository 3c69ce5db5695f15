//! Goal and micro-quest commands.

use clap::Subcommand;
use questline_core::{DecomposeRequest, GeminiClient, TaskStatus};

use crate::session::{self, print_events, resolve_macro_id, resolve_micro_id, Session};

#[derive(Subcommand)]
pub enum QuestAction {
    /// Decompose a new goal into micro-quests
    New {
        /// Goal title
        goal: String,
        /// Goal category (study, work, health, creative, home, ...)
        #[arg(long, default_value = "general")]
        category: String,
    },
    /// Regenerate a goal's micro-quests from feedback
    Refine {
        /// Goal ID (unique prefix accepted)
        id: String,
        /// What to change (e.g. "steps are too coarse")
        note: String,
    },
    /// List goals and their micro-quests
    List,
    /// Show one micro-quest in full
    Show {
        /// Micro-quest ID (unique prefix accepted)
        id: String,
    },
    /// Make a micro-quest the active one and start the timer
    Start {
        /// Micro-quest ID (unique prefix accepted)
        id: String,
    },
    /// Complete the active micro-quest
    Complete,
}

pub fn run(action: QuestAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    match action {
        QuestAction::New { goal, category } => {
            let request = DecomposeRequest {
                goal: goal.clone(),
                category: category.clone(),
                pacing: session.app.pacing_profile(),
                refinement_note: None,
                prior_drafts: None,
            };
            request.validate()?;

            let client = GeminiClient::from_config(&session.config.gateway)?;
            let drafts = session::runtime()?.block_on(client.decompose(&request))?;

            // Nothing is committed until the service call has resolved.
            let macro_task = session.app.create_macro_task(&goal, &category)?;
            session.app.attach_drafts(&macro_task.id, drafts)?;
            session.save()?;

            println!("Goal created: {}", macro_task.id);
            print_quest_list(&session, &macro_task.id);
        }
        QuestAction::Refine { id, note } => {
            let macro_id = resolve_macro_id(&session.app.state, &id)?;
            let macro_task = session
                .app
                .state
                .macro_task(&macro_id)
                .ok_or(format!("No goal matches '{id}'"))?
                .clone();
            let prior: Vec<_> = session
                .app
                .state
                .micro_tasks_of(&macro_id)
                .iter()
                .map(|t| t.as_draft())
                .collect();

            let request = DecomposeRequest {
                goal: macro_task.title.clone(),
                category: macro_task.category.clone(),
                pacing: session.app.pacing_profile(),
                refinement_note: Some(note),
                prior_drafts: Some(prior),
            };

            let client = GeminiClient::from_config(&session.config.gateway)?;
            let drafts = session::runtime()?.block_on(client.decompose(&request))?;

            session.app.replace_drafts(&macro_id, drafts)?;
            session.save()?;

            println!("Quest list regenerated for: {}", macro_task.title);
            print_quest_list(&session, &macro_id);
        }
        QuestAction::List => {
            if session.app.state.macro_tasks.is_empty() {
                println!("No goals yet. Try: questline quest new \"...\"");
                return Ok(());
            }
            for macro_task in session.app.state.macro_tasks.clone() {
                println!(
                    "{} {} [{}]",
                    status_icon(macro_task.status),
                    macro_task.title,
                    &macro_task.id[..8.min(macro_task.id.len())]
                );
                print_quest_list(&session, &macro_task.id);
            }
        }
        QuestAction::Show { id } => {
            let micro_id = resolve_micro_id(&session.app.state, &id)?;
            let task = session
                .app
                .state
                .micro_task(&micro_id)
                .ok_or(format!("No quest matches '{id}'"))?;
            println!("{}", serde_json::to_string_pretty(task)?);
        }
        QuestAction::Start { id } => {
            let micro_id = resolve_micro_id(&session.app.state, &id)?;
            let events = session.app.start_quest(&micro_id)?;
            session.save()?;
            let task = session
                .app
                .state
                .micro_task(&micro_id)
                .ok_or(format!("No quest matches '{id}'"))?;
            println!("Active quest: {} (~{} min)", task.title, task.duration_est_min);
            println!("Done when: {}", task.success_criteria);
            print_events(&events);
        }
        QuestAction::Complete => {
            let outcome = session.app.complete_active_quest()?;
            session.save()?;

            println!(
                "Quest complete! {} minute(s), +{} XP.",
                outcome.minutes, outcome.xp_gained
            );
            print_events(&outcome.events);
            match &outcome.next_quest_id {
                Some(next) => {
                    if let Some(task) = session.app.state.micro_task(next) {
                        println!("Next up: {} [{}]", task.title, &task.id[..8]);
                        if !task.next_hint.is_empty() {
                            println!("Hint: {}", task.next_hint);
                        }
                    }
                }
                None => println!("All micro-quests done. Add a new goal when ready."),
            }
        }
    }
    Ok(())
}

fn print_quest_list(session: &Session, macro_id: &str) {
    let active = session.app.state.active_quest_id.clone();
    for task in session.app.state.micro_tasks_of(macro_id) {
        let marker = if active.as_deref() == Some(&task.id) {
            "▶"
        } else {
            " "
        };
        println!(
            "  {}{} {} (~{} min, +{} XP) [{}]",
            marker,
            status_icon(task.status),
            task.title,
            task.duration_est_min,
            task.xp_reward,
            &task.id[..8.min(task.id.len())]
        );
    }
}

fn status_icon(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "◻",
        TaskStatus::Doing => "◧",
        TaskStatus::Done => "✅",
    }
}
