//! Request rendering and answer parsing. Pure functions so the protocol can
//! be tested without a network.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use augur_core::models::{Label, Mode};
use augur_core::traits::RuleSummary;

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn join(labels: &[Label]) -> String {
    labels
        .iter()
        .map(Label::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn build_request(
    model: &str,
    mode: Mode,
    rules: &[RuleSummary],
    recent: &[Label],
) -> ChatRequest {
    let [a, b] = mode.labels();
    let system = format!(
        "You forecast the next {mode} outcome of a binary sequence. \
         Reply with exactly one word: {a} or {b}."
    );

    let mut user = format!("Recent outcomes, oldest first: {}\n", join(recent));
    if rules.is_empty() {
        user.push_str("No mined rules are available.\n");
    } else {
        user.push_str("Mined rules, strongest first:\n");
        for (rank, rule) in rules.iter().enumerate() {
            user.push_str(&format!(
                "{}. {} (confidence {:.2}, support {})\n",
                rank + 1,
                rule.description,
                rule.confidence,
                rule.support
            ));
        }
    }
    user.push_str(&format!("Next {mode} outcome?"));

    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: user,
            },
        ],
        temperature: 0.0,
        max_tokens: 8,
    }
}

static LABEL_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\b(red|green|low|high|small|big)\b").ok());

/// First label token in `text` that belongs to `mode`.
pub fn parse_label(text: &str, mode: Mode) -> Option<Label> {
    LABEL_TOKEN
        .as_ref()?
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<Label>().ok())
        .find(|label| mode.accepts(*label))
}

/// Pull the assistant text out of a chat-completions response and parse it.
/// Anything unexpected yields `None`.
pub fn parse_response(body: &str, mode: Mode) -> Option<Label> {
    let response: ChatResponse = serde_json::from_str(body).ok()?;
    let content = response.choices.into_iter().next()?.message.content?;
    parse_label(&content, mode)
}
