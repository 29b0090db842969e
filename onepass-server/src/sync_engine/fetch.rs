//! External Sheet Endpoint Client
//!
//! Talks to the spreadsheet web app that fronts the import sheets. Every
//! call is fallible and non-fatal: an unreachable endpoint surfaces as an
//! error the handler turns into a `success:false` reply, never as a crash
//! and never as a mutated store.

use std::time::Duration;

use serde::Deserialize;

use crate::utils::{AppError, AppResult};
use shared::models::{ExternalMemberRow, Member};

#[derive(Debug, Deserialize)]
struct SheetEnvelope<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

#[derive(Clone)]
pub struct SheetClient {
    http: reqwest::Client,
}

impl Default for SheetClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self { http }
    }

    /// Pull the member rows the sheet currently holds (`action=getMembers`).
    pub async fn fetch_members(
        &self,
        endpoint: &str,
        token: Option<&str>,
    ) -> AppResult<Vec<ExternalMemberRow>> {
        let mut query: Vec<(&str, &str)> = vec![("action", "getMembers")];
        if let Some(t) = token {
            query.push(("token", t));
        }
        let envelope: SheetEnvelope<Vec<ExternalMemberRow>> = self
            .http
            .get(endpoint)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Sheet endpoint unreachable: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::external_service(format!("Sheet endpoint returned bad JSON: {e}")))?;

        if !envelope.success {
            let msg = envelope
                .message
                .unwrap_or_else(|| "Sheet endpoint reported failure".to_string());
            return Err(AppError::external_service(msg));
        }
        Ok(envelope.data.unwrap_or_default())
    }

    /// Push the canonical member table back to the sheet
    /// (`action=syncCommit`). Returns how many rows the sheet acknowledged.
    pub async fn push_members(
        &self,
        endpoint: &str,
        token: Option<&str>,
        members: &[Member],
    ) -> AppResult<usize> {
        let mut query: Vec<(&str, &str)> = vec![("action", "syncCommit")];
        if let Some(t) = token {
            query.push(("token", t));
        }
        let envelope: SheetEnvelope<usize> = self
            .http
            .post(endpoint)
            .query(&query)
            .json(&members)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Sheet endpoint unreachable: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::external_service(format!("Sheet endpoint returned bad JSON: {e}")))?;

        if !envelope.success {
            let msg = envelope
                .message
                .unwrap_or_else(|| "Sheet endpoint rejected the push".to_string());
            return Err(AppError::external_service(msg));
        }
        Ok(envelope.data.unwrap_or(members.len()))
    }
}
