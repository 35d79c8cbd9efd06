use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tera::Context;
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use quiz_core::answer::answers_match;
use quiz_core::model::QuizId;
use services::{PlayError, PlayOutcome, QuizServiceError};
use storage::repository::StorageError;

use crate::state::AppState;

const SESSION_COOKIE: &str = "quiz_session";

/// Request-level failure rendered as an HTTP error page.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Internal(message) => {
                tracing::error!("request failed: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (
            status,
            Html(format!("<h1>{status}</h1>\n<p>{message}</p>")),
        )
            .into_response()
    }
}

impl From<QuizServiceError> for AppError {
    fn from(err: QuizServiceError) -> Self {
        match err {
            QuizServiceError::Storage(StorageError::NotFound) => {
                AppError::NotFound("there is no quiz with that id".to_owned())
            }
            QuizServiceError::Quiz(err) => AppError::BadRequest(err.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<PlayError> for AppError {
    fn from(err: PlayError) -> Self {
        match err {
            PlayError::NoSuchQuiz(_) => AppError::NotFound(err.to_string()),
            PlayError::Storage(StorageError::NotFound) => {
                AppError::NotFound("there is no quiz with that id".to_owned())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => AppError::NotFound("there is no quiz with that id".to_owned()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Parse the id path segment, rejecting missing and non-numeric values with
/// distinct messages. Nothing is ever coerced to a default.
fn parse_quiz_id(raw: &str) -> Result<QuizId, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::BadRequest(
            "the <quizId> parameter is missing".to_owned(),
        ));
    }
    raw.parse::<u64>().map(QuizId::new).map_err(|_| {
        AppError::BadRequest("the <quizId> parameter is not a number".to_owned())
    })
}

/// Get or create the per-browser session token carried in a cookie.
fn session_token(cookies: &Cookies) -> String {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        return cookie.value().to_owned();
    }
    let token = Uuid::new_v4().to_string();
    tracing::info!(%token, "issuing a new play session token");
    let mut cookie = Cookie::new(SESSION_COOKIE, token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);
    token
}

fn render(state: &AppState, view: &str, context: &Context) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.render(view, context)?))
}

#[derive(Deserialize)]
pub struct AnswerQuery {
    answer: Option<String>,
}

#[derive(Deserialize)]
pub struct QuizForm {
    question: String,
    answer: String,
}

pub async fn home() -> Redirect {
    Redirect::to("/quizzes")
}

/// GET /quizzes
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let quizzes = state.quizzes.list().await?;
    let mut context = Context::new();
    context.insert("quizzes", &quizzes);
    render(&state, "quizzes/index.html", &context)
}

/// GET /quizzes/:quizId
pub async fn show(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_quiz_id(&raw_id)?;
    let quiz = state.quizzes.get(id).await?;
    let mut context = Context::new();
    context.insert("quiz", &quiz);
    render(&state, "quizzes/show.html", &context)
}

/// GET /quizzes/new
pub async fn new_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut context = Context::new();
    context.insert("question", "");
    context.insert("answer", "");
    render(&state, "quizzes/new.html", &context)
}

/// POST /quizzes
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<QuizForm>,
) -> Result<Redirect, AppError> {
    let quiz = state.quizzes.create(&form.question, &form.answer).await?;
    tracing::info!(id = %quiz.id(), "quiz created");
    Ok(Redirect::to(&format!("/quizzes/{}", quiz.id())))
}

/// GET /quizzes/:quizId/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_quiz_id(&raw_id)?;
    let quiz = state.quizzes.get(id).await?;
    let mut context = Context::new();
    context.insert("quiz", &quiz);
    render(&state, "quizzes/edit.html", &context)
}

/// POST /quizzes/:quizId
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<QuizForm>,
) -> Result<Redirect, AppError> {
    let id = parse_quiz_id(&raw_id)?;
    let quiz = state.quizzes.update(id, &form.question, &form.answer).await?;
    tracing::info!(id = %quiz.id(), "quiz updated");
    Ok(Redirect::to(&format!("/quizzes/{}", quiz.id())))
}

/// POST /quizzes/:quizId/delete
pub async fn destroy(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_quiz_id(&raw_id)?;
    state.quizzes.remove(id).await?;
    tracing::info!(%id, "quiz deleted");
    Ok(Redirect::to("/quizzes"))
}

/// GET /quizzes/:quizId/play
pub async fn play(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<AnswerQuery>,
) -> Result<Html<String>, AppError> {
    let id = parse_quiz_id(&raw_id)?;
    let quiz = state.quizzes.get(id).await?;
    let mut context = Context::new();
    context.insert("quiz", &quiz);
    context.insert("answer", &query.answer.unwrap_or_default());
    render(&state, "quizzes/play.html", &context)
}

/// GET /quizzes/:quizId/check?answer=
pub async fn check(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<AnswerQuery>,
) -> Result<Html<String>, AppError> {
    let id = parse_quiz_id(&raw_id)?;
    let quiz = state.quizzes.get(id).await?;
    let answer = query.answer.unwrap_or_default();
    let result = answers_match(&answer, quiz.answer());

    let mut context = Context::new();
    context.insert("quiz", &quiz);
    context.insert("result", &result);
    context.insert("answer", &answer);
    render(&state, "quizzes/result.html", &context)
}

/// GET /quizzes/randomplay
pub async fn random_play(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let token = session_token(&cookies);
    let session = state.sessions.load(&token).await?;
    let (next, outcome) = state.random_play.next_prompt(session).await?;
    state.sessions.save(&token, &next).await?;

    let mut context = Context::new();
    match outcome {
        PlayOutcome::Prompt { quiz, score } => {
            context.insert("quiz", &quiz);
            context.insert("score", &score);
            render(&state, "quizzes/random_play.html", &context)
        }
        PlayOutcome::Exhausted { score } => {
            context.insert("score", &score);
            render(&state, "quizzes/random_nomore.html", &context)
        }
    }
}

/// GET /quizzes/randomcheck/:quizId?answer=
pub async fn random_check(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(raw_id): Path<String>,
    Query(query): Query<AnswerQuery>,
) -> Result<Html<String>, AppError> {
    let id = parse_quiz_id(&raw_id)?;
    let answer = query.answer.unwrap_or_default();

    let token = session_token(&cookies);
    let session = state.sessions.load(&token).await?;
    let (next, verdict) = state.random_play.check_answer(session, id, &answer).await?;
    state.sessions.save(&token, &next).await?;

    let mut context = Context::new();
    context.insert("quiz", &verdict.quiz);
    context.insert("score", &verdict.score);
    context.insert("result", &verdict.correct);
    context.insert("answer", &verdict.submitted);
    render(&state, "quizzes/random_result.html", &context)
}

/// Any route that matched nothing.
pub async fn fallback(State(state): State<AppState>) -> Response {
    match render(&state, "404.html", &Context::new()) {
        Ok(html) => (StatusCode::NOT_FOUND, html).into_response(),
        Err(err) => err.into_response(),
    }
}
