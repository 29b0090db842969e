//! LLM Assistant
//!
//! Thin pass-through to a chat-completion endpoint for the member insight
//! and admin analyst features. The assistant is strictly best-effort: when
//! the endpoint is unconfigured, unreachable, or returns garbage, a canned
//! reply goes out and the request still succeeds.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use shared::models::Member;

const MEMBER_FALLBACK: &str = "Stable attendance record. Continue standard resumption protocol.";
const ANALYST_FALLBACK: &str = "Analyst offline. Data integrity remains secured.";

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Clone)]
pub struct AssistantService {
    http: reqwest::Client,
    endpoint: Option<String>,
    model: String,
    api_key: Option<String>,
}

impl AssistantService {
    pub fn new(endpoint: Option<String>, model: String, api_key: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_default();
        Self {
            http,
            endpoint,
            model,
            api_key,
        }
    }

    /// Short member-facing summary of their standing.
    pub async fn member_insights(&self, member: &Member) -> String {
        let prompt = format!(
            "You are the OnePass desk assistant. In two sentences, summarize this member's standing and suggest one action. Name: {}. Status: {}. Wallet balance: {}. Outstanding fines: {}. Reward points: {}.",
            member.name,
            member.status,
            member.wallet_balance,
            member.outstanding_fines,
            member.reward_points
        );
        self.complete(&prompt, MEMBER_FALLBACK).await
    }

    /// Admin analyst: free-form question over an org-level stats summary.
    pub async fn analyst(&self, question: &str, context: &str) -> String {
        let prompt = format!(
            "You are the OnePass operations analyst. Answer concisely for an administrator.\nData: {context}\nQuestion: {question}"
        );
        self.complete(&prompt, ANALYST_FALLBACK).await
    }

    async fn complete(&self, prompt: &str, fallback: &str) -> String {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return fallback.to_string();
        };

        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
        });

        let mut request = self.http.post(endpoint).json(&body);
        if let Some(key) = self.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        match request.send().await {
            Ok(resp) => match resp.json::<ChatCompletion>().await {
                Ok(completion) => completion
                    .choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
                Err(e) => {
                    tracing::warn!(error = %e, "Assistant returned unparseable reply");
                    fallback.to_string()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Assistant endpoint unreachable");
                fallback.to_string()
            }
        }
    }
}
