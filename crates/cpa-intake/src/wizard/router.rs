use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use tracing::debug;

use super::controller::WizardError;
use super::domain::{ContactPreference, DetailsForm, GeneralAnswers};
use super::html::WizardPages;
use super::service::{WizardService, WizardServiceError};
use super::store::{SessionId, SessionStore};
use crate::config::SessionConfig;
use crate::error::AppError;

const WIZARD_PATH: &str = "/wizard";

/// Shared state for the wizard routes.
pub struct WizardRouteState<S> {
    pub service: Arc<WizardService<S>>,
    pub pages: Arc<WizardPages>,
    pub cookie: SessionConfig,
}

impl<S> Clone for WizardRouteState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            pages: self.pages.clone(),
            cookie: self.cookie.clone(),
        }
    }
}

/// Router serving the wizard screens, form posts, and the PDF download.
pub fn wizard_router<S>(state: WizardRouteState<S>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route("/", get(|| async { Redirect::to(WIZARD_PATH) }))
        .route(WIZARD_PATH, get(show_handler::<S>))
        .route("/wizard/general", post(general_handler::<S>))
        .route("/wizard/details", post(details_handler::<S>))
        .route("/wizard/generate", post(generate_handler::<S>))
        .route("/wizard/reset", post(reset_handler::<S>))
        .route("/api/v1/wizard", get(view_json_handler::<S>))
        .with_state(state)
}

/// Second-screen form post; `action` tells Back from Submit.
#[derive(Debug, Deserialize)]
pub(crate) struct DetailsSubmission {
    #[serde(default)]
    action: DetailsAction,
    #[serde(default)]
    main_concern: String,
    #[serde(default)]
    contact_pref: ContactPreference,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    interest_confirm: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DetailsAction {
    Back,
    #[default]
    Submit,
}

impl DetailsSubmission {
    fn into_parts(self) -> (DetailsAction, DetailsForm) {
        let form = DetailsForm {
            main_concern: self.main_concern,
            contact_pref: self.contact_pref,
            email: self.email,
            phone: self.phone,
            interest_confirm: self.interest_confirm,
        };
        (self.action, form)
    }
}

/// Session id from the request cookie, plus whether a new one had to be issued.
fn resolve_session(headers: &HeaderMap, cookie: &SessionConfig) -> (SessionId, bool) {
    let existing = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie.cookie_name)
        .and_then(|(_, value)| SessionId::parse(value));

    match existing {
        Some(id) => (id, false),
        None => (SessionId::generate(), true),
    }
}

fn with_session_cookie(
    mut response: Response,
    id: &SessionId,
    issued: bool,
    cookie: &SessionConfig,
) -> Response {
    if !issued {
        return response;
    }

    let mut value = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        cookie.cookie_name, id
    );
    if cookie.secure_cookie {
        value.push_str("; Secure");
    }
    if let Ok(header_value) = HeaderValue::from_str(&value) {
        response
            .headers_mut()
            .append(header::SET_COOKIE, header_value);
    }
    response
}

/// Stale tabs post to the wrong step; they simply get the current screen back.
fn settle(result: Result<(), WizardServiceError>) -> Result<(), AppError> {
    match result {
        Ok(()) => Ok(()),
        Err(WizardServiceError::Wizard(WizardError::OutOfSequence { expected, actual })) => {
            debug!(?expected, ?actual, "ignoring out-of-sequence wizard request");
            Ok(())
        }
        Err(WizardServiceError::Wizard(_)) => Ok(()),
        Err(WizardServiceError::Store(err)) => Err(err.into()),
    }
}

fn redirect_to_wizard(id: &SessionId, issued: bool, cookie: &SessionConfig) -> Response {
    with_session_cookie(
        Redirect::to(WIZARD_PATH).into_response(),
        id,
        issued,
        cookie,
    )
}

fn render_page<S>(
    state: &WizardRouteState<S>,
    id: &SessionId,
    status: StatusCode,
) -> Result<Response, AppError>
where
    S: SessionStore + 'static,
{
    let view = state.service.view(id).map_err(service_error)?;
    let html = state.pages.render(&view)?;
    Ok((status, Html(html)).into_response())
}

fn service_error(err: WizardServiceError) -> AppError {
    match err {
        WizardServiceError::Store(err) => err.into(),
        WizardServiceError::Wizard(err) => AppError::Wizard(err),
    }
}

pub(crate) async fn show_handler<S>(
    State(state): State<WizardRouteState<S>>,
    headers: HeaderMap,
) -> Result<Response, AppError>
where
    S: SessionStore + 'static,
{
    let (id, issued) = resolve_session(&headers, &state.cookie);
    let response = render_page(&state, &id, StatusCode::OK)?;
    Ok(with_session_cookie(response, &id, issued, &state.cookie))
}

pub(crate) async fn general_handler<S>(
    State(state): State<WizardRouteState<S>>,
    headers: HeaderMap,
    Form(answers): Form<GeneralAnswers>,
) -> Result<Response, AppError>
where
    S: SessionStore + 'static,
{
    let (id, issued) = resolve_session(&headers, &state.cookie);
    settle(state.service.submit_general(&id, answers))?;
    Ok(redirect_to_wizard(&id, issued, &state.cookie))
}

pub(crate) async fn details_handler<S>(
    State(state): State<WizardRouteState<S>>,
    headers: HeaderMap,
    Form(submission): Form<DetailsSubmission>,
) -> Result<Response, AppError>
where
    S: SessionStore + 'static,
{
    let (id, issued) = resolve_session(&headers, &state.cookie);
    let (action, form) = submission.into_parts();
    let result = match action {
        DetailsAction::Back => state.service.back(&id, form),
        DetailsAction::Submit => state.service.submit_details(&id, form),
    };
    settle(result)?;
    Ok(redirect_to_wizard(&id, issued, &state.cookie))
}

pub(crate) async fn generate_handler<S>(
    State(state): State<WizardRouteState<S>>,
    headers: HeaderMap,
) -> Result<Response, AppError>
where
    S: SessionStore + 'static,
{
    let (id, issued) = resolve_session(&headers, &state.cookie);
    let today = Local::now().date_naive();

    match state.service.generate(&id, today) {
        Ok(summary) => {
            let disposition = format!("attachment; filename=\"{}\"", summary.file_name);
            let response = (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, summary.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                summary.bytes,
            )
                .into_response();
            Ok(with_session_cookie(response, &id, issued, &state.cookie))
        }
        Err(WizardServiceError::Wizard(WizardError::Render(_))) => {
            let response = render_page(&state, &id, StatusCode::UNPROCESSABLE_ENTITY)?;
            Ok(with_session_cookie(response, &id, issued, &state.cookie))
        }
        Err(other) => {
            settle(Err(other))?;
            Ok(redirect_to_wizard(&id, issued, &state.cookie))
        }
    }
}

pub(crate) async fn reset_handler<S>(
    State(state): State<WizardRouteState<S>>,
    headers: HeaderMap,
) -> Result<Response, AppError>
where
    S: SessionStore + 'static,
{
    let (id, issued) = resolve_session(&headers, &state.cookie);
    settle(state.service.start_over(&id))?;
    Ok(redirect_to_wizard(&id, issued, &state.cookie))
}

pub(crate) async fn view_json_handler<S>(
    State(state): State<WizardRouteState<S>>,
    headers: HeaderMap,
) -> Result<Response, AppError>
where
    S: SessionStore + 'static,
{
    let (id, issued) = resolve_session(&headers, &state.cookie);
    let view = state.service.view(&id).map_err(service_error)?;
    Ok(with_session_cookie(
        Json(view).into_response(),
        &id,
        issued,
        &state.cookie,
    ))
}
