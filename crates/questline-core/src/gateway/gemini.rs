//! Gemini-backed implementation of the decomposition/advice contract.
//!
//! Speaks the `generateContent` REST API. The decomposition prompt carries
//! the pacing parameters and the calibration guidance verbatim; the
//! response is expected to be a JSON array of draft objects.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::{keyring_store, DecomposeRequest, FRESH_DRAFT_MAX, FRESH_DRAFT_MIN};
use crate::error::GatewayError;
use crate::storage::GatewayConfig;
use crate::task::{EnergyMode, MicroTaskDraft};

/// Keyring entry holding the API key.
pub const API_KEY_ENTRY: &str = "gemini_api_key";
/// Environment fallback when no keyring entry exists.
pub const API_KEY_ENV: &str = "QUESTLINE_API_KEY";

/// Returned by the advice call whenever the service fails; advice is
/// best-effort and never surfaces an error to the caller.
pub const ADVICE_FALLBACK: &str =
    "The analysis hit a snag, but your effort was recorded. See you tomorrow.";

const SYSTEM_INSTRUCTION: &str = "\
You are a world-class productivity coach for people with ADHD traits or a \
serious procrastination habit. Your goal is to bring the user's felt \
psychological resistance as close to zero as possible.

Decomposition rules:
1. The first step must be overwhelmingly easy (e.g. \"sit at the desk\", \
\"open the laptop\").
2. Each step is a concrete action finishable in roughly 5-15 minutes.
3. Use concrete motions (\"pick the 3 key metrics out of the data\") instead \
of abstractions (\"analyze\").
4. Keep a logical flow, with checkpoints that feel like small wins.
5. The more complex the goal, the more steps: raise the frequency of wins.

Calibration:
- energyMode \"low\": keep individual durations at the short end of the range.
- accuracyRatio above 1.0: the user runs over their estimates; inflate \
durations accordingly and split steps finer.
- accuracyRatio below 1.0: tighten durations; steps may be coarser.

Respond with a JSON array of objects with exactly these keys: title, \
durationEstMin, difficulty (1-5), frictionScore (1-5), xpReward, \
successCriteria, nextHint.";

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// HTTP client for the decomposition/advice service.
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from config, resolving the API key from the OS
    /// keyring with an environment-variable fallback.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let api_key = keyring_store::get(API_KEY_ENTRY)
            .ok()
            .flatten()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.is_empty())
            .ok_or(GatewayError::MissingApiKey)?;
        Ok(Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
        ))
    }

    fn generate_url(&self) -> Result<Url, GatewayError> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| GatewayError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            message: e.to_string(),
        })?;
        url.set_path(&format!("/v1beta/models/{}:generateContent", self.model));
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Decompose a goal into an ordered list of micro-task drafts.
    ///
    /// A fresh request must yield 3-6 drafts. A refinement request (note +
    /// prior drafts present) yields a full replacement list of any length;
    /// on failure the caller keeps its prior list unchanged.
    pub async fn decompose(
        &self,
        request: &DecomposeRequest,
    ) -> Result<Vec<MicroTaskDraft>, GatewayError> {
        let body = json!({
            "system_instruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": [{ "parts": [{ "text": build_prompt(request) }] }],
            "generation_config": { "response_mime_type": "application/json" },
        });

        let text = self.generate(body).await?;
        let drafts: Vec<MicroTaskDraft> = serde_json::from_str(&text)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        if !request.is_refinement()
            && !(FRESH_DRAFT_MIN..=FRESH_DRAFT_MAX).contains(&drafts.len())
        {
            return Err(GatewayError::DraftCountOutOfRange {
                count: drafts.len(),
            });
        }
        Ok(drafts)
    }

    /// Turn a reflection into a short line of advice.
    ///
    /// Never fails: any service error collapses to [`ADVICE_FALLBACK`].
    pub async fn advice(&self, reflection: &str, stats_summary: &serde_json::Value) -> String {
        let prompt = format!(
            "User reflection: \"{reflection}\"\nUser stats: {stats_summary}\n\
             Offer 2-3 sentences of warm, specific feedback."
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        match self.generate(body).await {
            Ok(text) if !text.trim().is_empty() => text,
            _ => ADVICE_FALLBACK.to_string(),
        }
    }

    /// POST a generateContent body and extract the first candidate's text.
    async fn generate(&self, body: serde_json::Value) -> Result<String, GatewayError> {
        let url = self.generate_url()?;
        let response = self.http.post(url).json(&body).send().await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(GatewayError::QuotaExceeded);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message: truncate(&message, 200),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        let text: String = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        Ok(text)
    }
}

fn build_prompt(request: &DecomposeRequest) -> String {
    let energy = match request.pacing.energy_mode {
        EnergyMode::Low => "low",
        EnergyMode::Normal => "normal",
    };
    let mut prompt = format!(
        "User goal: \"{}\" (category: {})\nUser state: level {}, {}-day streak, \
         energy mode {}, accuracy ratio {:.2}.",
        request.goal,
        request.category,
        request.pacing.level,
        request.pacing.streak,
        energy,
        request.pacing.accuracy_ratio,
    );

    match (&request.refinement_note, &request.prior_drafts) {
        (Some(note), Some(prior)) => {
            let prior_json = serde_json::to_string(prior).unwrap_or_else(|_| "[]".to_string());
            prompt.push_str(&format!(
                "\n\nCurrently generated steps: {prior_json}\nUser feedback: \"{note}\"\n\
                 Produce a full replacement list of steps reflecting this feedback; \
                 restructure or split further as needed."
            ));
        }
        _ => {
            prompt.push_str("\n\nGenerate the micro-quests for reaching this goal.");
        }
    }
    prompt
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}
