use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::bank::QuestionBank;
use crate::models::{AnswerSet, BankVariant, ScoreResponse};
use crate::services::scoring::ScoringEngine;

#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    pub bank: Option<String>,
}

/// Returns the questions of a bank for a UI to render. Defaults to the
/// full bank when no variant is given.
pub async fn get_questions(
    State(_state): State<Arc<AppConfig>>,
    Query(query): Query<QuestionsQuery>,
) -> Result<Json<Value>, AppError> {
    let variant = match query.bank.as_deref() {
        None | Some("full") => BankVariant::Full,
        Some("onboarding") => BankVariant::Onboarding,
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "Unknown question bank: {}",
                other
            )))
        }
    };

    let bank = QuestionBank::for_variant(variant);
    debug!("Serving {} bank ({} questions)", variant, bank.len());

    Ok(Json(json!({
        "bank": variant,
        "count": bank.len(),
        "questions": bank.questions(),
    })))
}

/// Scores a submitted answer set and returns the constitution result.
/// The bank is selected from the variant tag the answers were collected
/// against, so answers can never be normalized with the wrong ceiling.
pub async fn score_assessment(
    State(state): State<Arc<AppConfig>>,
    Json(answer_set): Json<AnswerSet>,
) -> Result<Json<ScoreResponse>, AppError> {
    let bank = QuestionBank::for_variant(answer_set.variant);
    let engine = ScoringEngine::new(state.close_threshold);

    let result = engine.score(bank, &answer_set)?;

    Ok(Json(ScoreResponse {
        assessment_id: Uuid::new_v4(),
        assessed_at: Utc::now(),
        result,
    }))
}
