//! Daily reflection command.

use questline_core::gateway::gemini::ADVICE_FALLBACK;
use questline_core::{GatewayError, GeminiClient};

use crate::session::{self, print_events, Session};

pub fn run(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    if text.trim().is_empty() {
        return Err("Reflection text must not be empty".into());
    }

    let mut session = Session::open()?;

    // Advice is best-effort: no API key just means the canned line.
    let advice = match GeminiClient::from_config(&session.config.gateway) {
        Ok(client) => {
            let stats = session.app.stats_summary();
            session::runtime()?.block_on(client.advice(text, &stats))
        }
        Err(GatewayError::MissingApiKey) => ADVICE_FALLBACK.to_string(),
        Err(e) => return Err(e.into()),
    };

    let events = session.app.submit_reflection(text, &advice)?;
    session.save()?;

    println!("Coach: {advice}");
    print_events(&events);
    Ok(())
}
