//! Roster page handlers
//!
//! Post/redirect/get over the shared roster client: every mutation is a form
//! POST that runs one client operation and redirects back to `/`.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tracing::{debug, error};

use super::state::AppState;
use crate::domain::roster::{format_date, StatusMessage, DELETE_PROMPT};
use crate::domain::{FormState, User, UserId};
use crate::infrastructure::Answered;

/// One roster entry, ready for display
#[derive(Debug, Clone)]
pub struct UserCard {
    pub id: String,
    pub username: String,
    pub email: String,
    pub birthday: String,
    pub delete_href: String,
}

impl From<&User> for UserCard {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            birthday: format_date(user.date_of_birth()),
            delete_href: delete_href(user.id()),
        }
    }
}

fn delete_href(id: &UserId) -> String {
    format!("/users/{}/delete", urlencoding::encode(id.as_str()))
}

#[derive(Template)]
#[template(path = "roster.html")]
pub struct RosterTemplate {
    pub message: Option<StatusMessage>,
    pub form: FormState,
    pub loading: bool,
    pub users: Vec<UserCard>,
}

#[derive(Template)]
#[template(path = "confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub prompt: &'static str,
    pub user: Option<UserCard>,
    pub delete_href: String,
}

/// Creation form as posted by the browser
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "dateOfBirth")]
    pub date_of_birth: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub confirm: String,
}

impl ConfirmForm {
    fn accepted(&self) -> bool {
        self.confirm == "yes"
    }
}

pub fn create_roster_router() -> Router<AppState> {
    Router::new()
        .route("/", get(roster_page))
        .route("/users", post(create_user))
        .route("/users/{id}/delete", get(confirm_delete).post(delete_user))
        .route("/refresh", post(refresh))
}

fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render template");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

fn parse_id(raw: String) -> Result<UserId, Response> {
    UserId::new(raw).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()).into_response())
}

/// GET / - roster, creation form and status message
pub async fn roster_page(State(state): State<AppState>) -> Response {
    let snapshot = state.roster.snapshot().await;

    let template = RosterTemplate {
        message: snapshot.roster.message().cloned(),
        loading: snapshot.roster.loading(),
        users: snapshot.roster.users().iter().map(UserCard::from).collect(),
        form: snapshot.form,
    };

    render(&template)
}

impl From<CreateUserForm> for FormState {
    fn from(form: CreateUserForm) -> Self {
        Self {
            username: form.username,
            email: form.email,
            date_of_birth: form.date_of_birth,
        }
    }
}

/// POST /users - submit the posted form
pub async fn create_user(
    State(state): State<AppState>,
    Form(form): Form<CreateUserForm>,
) -> Redirect {
    let outcome = state.roster.submit_form(form.into()).await;
    debug!(?outcome, "Create form handled");

    Redirect::to("/")
}

/// GET /users/{id}/delete - ask before deleting
pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let roster = state.roster.roster().await;
    let template = ConfirmDeleteTemplate {
        prompt: DELETE_PROMPT,
        user: roster.find(&id).map(UserCard::from),
        delete_href: delete_href(&id),
    };

    render(&template)
}

/// POST /users/{id}/delete - carry out the operator's answer
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    state
        .roster
        .delete_user(&id, &Answered(form.accepted()))
        .await;

    Redirect::to("/").into_response()
}

/// POST /refresh - refetch the roster
pub async fn refresh(State(state): State<AppState>) -> Redirect {
    state.roster.list_users().await;
    Redirect::to("/")
}
