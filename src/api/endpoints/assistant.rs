//! Chat page endpoints backed by the canned-question assistant.
//!
//! - `POST /api/assistant/ask`: answer one question
//! - `GET /api/assistant/questions`: prompts the assistant understands

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::assistant::{self, QuestionHint, HELP_TEXT};

#[derive(Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub question: String,
    pub answer: String,
}

pub async fn ask(
    State(ctx): State<ApiContext>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = payload?;
    let question = request.question.trim();
    if question.is_empty() {
        return Err(ApiError::Validation("Question is required".into()));
    }

    let conn = ctx.open_db()?;
    let answer = assistant::answer(&conn, question);

    Ok(Json(AskResponse {
        question: question.to_string(),
        answer,
    }))
}

#[derive(Serialize)]
pub struct QuestionsResponse {
    pub help: &'static str,
    pub questions: Vec<QuestionHint>,
}

pub async fn questions() -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        help: HELP_TEXT,
        questions: assistant::supported_questions(),
    })
}
