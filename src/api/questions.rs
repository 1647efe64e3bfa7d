//! Question API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{require_admin, success, ApiResult};
use crate::auth::Caller;
use crate::errors::AppError;
use crate::models::{
    validate_answer_text, validate_question_text, Answer, AnswerQuestionRequest,
    AskQuestionRequest, Question, ReportContentRequest,
};
use crate::AppState;

/// GET /api/questions - List all questions, newest first.
pub async fn list_questions(State(state): State<AppState>) -> ApiResult<Vec<Question>> {
    let questions = state.repo.list_questions().await?;
    success(questions)
}

/// GET /api/questions/unanswered - List questions awaiting an answer.
pub async fn list_unanswered_questions(State(state): State<AppState>) -> ApiResult<Vec<Question>> {
    let questions = state.repo.list_unanswered_questions().await?;
    success(questions)
}

/// GET /api/users/:id/questions - List questions asked by a user.
pub async fn list_questions_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<Question>> {
    let questions = state.repo.list_questions_by_user(&user_id).await?;
    success(questions)
}

/// GET /api/questions/:id - Get a single question.
pub async fn get_question(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Question> {
    match state.repo.get_question(id).await? {
        Some(question) => success(question),
        None => Err(AppError::NotFound(format!("Question {} not found", id))),
    }
}

/// POST /api/questions - Ask a new question.
pub async fn ask_question(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<AskQuestionRequest>,
) -> ApiResult<Question> {
    let author = caller.require()?;
    let text = validate_question_text(&request.text).map_err(AppError::Validation)?;

    let question = state
        .repo
        .ask_question(author, text, request.is_anonymous)
        .await?;

    tracing::info!(question_id = question.id, anonymous = request.is_anonymous, "question asked");
    success(question)
}

/// POST /api/questions/:id/answer - Answer a question (moderators only).
pub async fn answer_question(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
    Json(request): Json<AnswerQuestionRequest>,
) -> ApiResult<Answer> {
    let author = require_admin(&state, &caller).await?;
    let text = validate_answer_text(&request.text).map_err(AppError::Validation)?;

    let answer = state.repo.answer_question(id, &author, text).await?;

    tracing::info!(question_id = id, "question answered");
    success(answer)
}

/// DELETE /api/questions/:id - Delete a question (moderators only).
pub async fn delete_question(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    require_admin(&state, &caller).await?;
    state.repo.delete_question(id).await?;

    tracing::info!(question_id = id, "question deleted");
    success(())
}

/// POST /api/questions/:id/report - Report a question for moderator review.
pub async fn report_question(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
    Json(request): Json<ReportContentRequest>,
) -> ApiResult<()> {
    let reporter = caller.require()?;
    state
        .repo
        .report_question(id, reporter, request.reason.as_deref())
        .await?;

    tracing::info!(question_id = id, "question reported");
    success(())
}
