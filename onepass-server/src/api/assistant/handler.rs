//! Assistant handlers
//!
//! Both endpoints always return 200 with text: the LLM reply when the
//! endpoint cooperates, the canned fallback otherwise.

use axum::{Extension, Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{access_log, member};
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::client::{AnalystRequest, AssistantReply};

pub async fn insights(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<AssistantReply>>> {
    let m = member::find_by_id(state.pool(), &user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member {}", user.id)))?;
    let text = state.assistant.member_insights(&m).await;
    Ok(ok(AssistantReply { text }))
}

pub async fn analyst(
    State(state): State<ServerState>,
    Json(req): Json<AnalystRequest>,
) -> AppResult<Json<AppResponse<AssistantReply>>> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(AppError::validation("question must not be empty"));
    }

    // Small org-level summary as grounding for the model.
    let members = member::find_all(state.pool()).await?;
    let late = members
        .iter()
        .filter(|m| m.status == shared::models::MemberStatus::Late)
        .count();
    let total_fines: i64 = members.iter().map(|m| m.outstanding_fines).sum();
    let recent = access_log::query(state.pool(), &shared::models::AccessLogQuery::default()).await?;
    let recent_denials = recent
        .iter()
        .filter(|e| e.outcome == shared::models::AccessOutcome::Denied)
        .count();
    let context = format!(
        "members={}, currently_late={}, total_outstanding_fines={}, recent_denials={}",
        members.len(),
        late,
        total_fines,
        recent_denials
    );

    let text = state.assistant.analyst(question, &context).await;
    Ok(ok(AssistantReply { text }))
}
