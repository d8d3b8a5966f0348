//! Practice session endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use practice_core::{AnswerOutcome, SessionController, SessionError};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

fn session_not_found(session_id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Session {} not found", session_id))
}

/// POST /api/sessions
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<CreateSessionResponse>)> {
    let mode = payload.mode;
    let session_id = state
        .sessions
        .create(payload.word_list_id, payload.user_id, mode, payload.words);

    let (started_at, prompt) = state
        .sessions
        .with_session(session_id, |session| {
            let started_at = session.state().started_at();
            (started_at, PromptResponse::from(session.current_prompt()))
        })
        .ok_or_else(|| ApiError::Internal("Session vanished after creation".to_string()))?;

    // An empty word list is complete from the start and never yields a result
    if prompt.complete {
        state.sessions.remove(session_id);
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            mode,
            started_at,
            prompt,
        }),
    ))
}

/// GET /api/sessions/:id/prompt
/// Quiz options stay the same across reads until the session advances
pub async fn prompt(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<PromptResponse>> {
    let prompt = state
        .sessions
        .with_session(session_id, |session| {
            PromptResponse::from(session.current_prompt())
        })
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(Json(prompt))
}

/// GET /api/sessions/:id/progress
pub async fn progress(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Progress>> {
    let progress = state
        .sessions
        .with_session(session_id, |session| session.progress())
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(Json(progress))
}

/// POST /api/sessions/:id/answers
/// Records the answer for the current word; the answer that completes the
/// session also produces and stores its test result and releases the session
pub async fn answer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<Json<SubmitAnswerResponse>> {
    let (mut response, result) = state
        .sessions
        .with_session(session_id, |session| record_answer(session, &payload))
        .ok_or_else(|| session_not_found(session_id))??;

    if let Some(result) = result {
        state.sessions.remove(session_id);
        response.result_id = Some(state.results.save(result.clone()));
        response.result = Some(result);
    }

    Ok(Json(response))
}

fn record_answer(
    session: &mut SessionController,
    payload: &SubmitAnswerRequest,
) -> Result<(SubmitAnswerResponse, Option<TestResult>)> {
    let Some(word) = session.current_word() else {
        return Err(SessionError::AlreadyComplete {
            answered: session.state().outcomes().len(),
        }
        .into());
    };
    let correct_translations = word.canonical_translations();

    let outcome = match (session.mode(), payload.response.as_deref(), payload.correct) {
        (PracticeMode::Flashcards, _, Some(correct)) => AnswerOutcome::flashcard(correct),
        (PracticeMode::Flashcards, _, None) => {
            return Err(ApiError::BadRequest(
                "Flashcard answers need a `correct` flag".to_string(),
            ))
        }
        (_, Some(response), _) => session
            .evaluate(response)
            .ok_or_else(|| ApiError::Internal("No outcome for active session".to_string()))?,
        (mode, None, _) => {
            return Err(ApiError::BadRequest(format!(
                "{} answers need a `response`",
                mode.as_str()
            )))
        }
    };

    session.submit_answer(outcome.clone())?;

    let result = if session.is_complete() {
        Some(session.finish(Utc::now())?)
    } else {
        None
    };

    Ok((
        SubmitAnswerResponse {
            outcome,
            correct_translations,
            progress: session.progress(),
            complete: session.is_complete(),
            result_id: None,
            result: None,
        },
        result,
    ))
}

/// DELETE /api/sessions/:id
/// Abandoning an unfinished session produces no result
pub async fn abandon(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode> {
    state
        .sessions
        .remove(session_id)
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(StatusCode::NO_CONTENT)
}
