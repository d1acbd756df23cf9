//! Request handlers
//!
//! Every handler receives its session as a working copy, applies one
//! repository operation and commits the session back before answering.
//! Domain errors never escape as rejections: validation failures re-render
//! the submitted form and missing lists or todos redirect with a flash.

use crate::error::{ServerError, WebError};
use crate::state::AppState;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use todo_core::{ListId, TodoError, TodoId};
use todo_session::Session;
use warp::http::header::{HeaderValue, LOCATION, SET_COOKIE};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Rejection, Reply};

/// Flash after a list is created
pub const LIST_CREATED: &str = "The list has been created.";
/// Flash after a list is renamed
pub const LIST_RENAMED: &str = "The list has been renamed.";
/// Flash after a list is deleted
pub const LIST_DELETED: &str = "The list has been deleted.";
/// Flash after a todo is added
pub const TODO_ADDED: &str = "The todo was added.";
/// Flash after a todo is deleted
pub const TODO_DELETED: &str = "The todo has been deleted";
/// Flash after a todo's completion changes
pub const TODO_UPDATED: &str = "The todo has been updated.";
/// Flash after every todo of a list is completed
pub const ALL_COMPLETED: &str = "All todo items marked complete.";

/// Body an AJAX list delete answers with: where the browser should go next
pub const AFTER_LIST_DELETE: &str = "/lists";

/// Result of every handler
pub type HandlerResult = Result<Response, Rejection>;

/// `list_name` form field, create and rename
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListForm {
    /// Submitted list name
    pub list_name: String,
}

/// `todo` form field
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TodoForm {
    /// Submitted todo name
    pub todo: String,
}

/// `completed` form field
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CompletionForm {
    /// `"true"` marks the todo completed, anything else clears it
    pub completed: String,
}

impl CompletionForm {
    /// Requested completion state
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed == "true"
    }
}

fn list_path(id: ListId) -> String {
    format!("/lists/{id}")
}

fn redirect(location: &str) -> Response {
    let mut response = StatusCode::SEE_OTHER.into_response();
    match HeaderValue::from_str(location) {
        Ok(value) => {
            response.headers_mut().insert(LOCATION, value);
        }
        Err(err) => tracing::error!(%err, location, "unusable redirect location"),
    }
    response
}

fn server_error(err: WebError) -> Rejection {
    warp::reject::custom(ServerError::from(err))
}

/// Commit the session and attach its cookie if the browser lacks one
///
/// A new session that still holds nothing is neither stored nor given a
/// cookie.
fn finish(state: &AppState, session: Session, mut response: Response) -> Response {
    if session.is_pristine() {
        return response;
    }
    if let Some(cookie) = state.sessions.commit(session) {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(err) => tracing::error!(%err, "session cookie is not a valid header"),
        }
    }
    response
}

/// Answer with a rendered page; the flash it showed is cleared
fn page(state: &AppState, mut session: Session, rendered: Result<String, WebError>) -> HandlerResult {
    let body = rendered.map_err(server_error)?;
    session.clear_flash();
    Ok(finish(state, session, warp::reply::html(body).into_response()))
}

fn not_found(state: &AppState, mut session: Session, err: &TodoError, location: &str) -> Response {
    tracing::warn!(%err, location, "redirecting after failed lookup");
    session.flash_mut().set_error(err.to_string());
    finish(state, session, redirect(location))
}

fn done(state: &AppState, mut session: Session, message: &str, location: &str) -> Response {
    session.flash_mut().set_success(message);
    finish(state, session, redirect(location))
}

/// `GET /`
pub async fn root() -> HandlerResult {
    Ok(redirect("/lists"))
}

/// `GET /lists`
pub async fn show_lists(state: Arc<AppState>, session: Session) -> HandlerResult {
    let rendered = state.views.lists_page(session.flash(), session.lists());
    page(&state, session, rendered)
}

/// `GET /lists/new`
pub async fn new_list_form(state: Arc<AppState>, session: Session) -> HandlerResult {
    let rendered = state.views.new_list_page(session.flash(), "");
    page(&state, session, rendered)
}

/// `POST /lists`
pub async fn create_list(state: Arc<AppState>, mut session: Session, form: ListForm) -> HandlerResult {
    let created = session.lists_mut().create_list(&form.list_name).map(|list| list.id);
    match created {
        Ok(id) => {
            tracing::info!(list_id = %id, "{LIST_CREATED}");
            Ok(done(&state, session, LIST_CREATED, "/lists"))
        }
        Err(err) => {
            tracing::debug!(%err, "list name rejected");
            session.flash_mut().set_error(err.to_string());
            let rendered = state.views.new_list_page(session.flash(), &form.list_name);
            page(&state, session, rendered)
        }
    }
}

/// `GET /lists/:id`
pub async fn show_list(id: ListId, state: Arc<AppState>, session: Session) -> HandlerResult {
    let rendered = match session.lists().find_list(id) {
        Ok(list) => state.views.list_page(session.flash(), list, ""),
        Err(err) => return Ok(not_found(&state, session, &err, "/lists")),
    };
    page(&state, session, rendered)
}

/// `GET /lists/:id/edit`
pub async fn edit_list_form(id: ListId, state: Arc<AppState>, session: Session) -> HandlerResult {
    let rendered = match session.lists().find_list(id) {
        Ok(list) => state.views.edit_list_page(session.flash(), list, None),
        Err(err) => return Ok(not_found(&state, session, &err, "/lists")),
    };
    page(&state, session, rendered)
}

/// `POST /lists/:id`
pub async fn update_list(
    id: ListId,
    state: Arc<AppState>,
    mut session: Session,
    form: ListForm,
) -> HandlerResult {
    match session.lists_mut().rename_list(id, &form.list_name) {
        Ok(()) => {
            tracing::info!(list_id = %id, "{LIST_RENAMED}");
            Ok(done(&state, session, LIST_RENAMED, &list_path(id)))
        }
        Err(err) if err.is_validation() => {
            tracing::debug!(list_id = %id, %err, "list rename rejected");
            session.flash_mut().set_error(err.to_string());
            let rendered = match session.lists().find_list(id) {
                Ok(list) => state
                    .views
                    .edit_list_page(session.flash(), list, Some(&form.list_name)),
                Err(err) => return Ok(not_found(&state, session, &err, "/lists")),
            };
            page(&state, session, rendered)
        }
        Err(err) => Ok(not_found(&state, session, &err, "/lists")),
    }
}

/// `POST /lists/:id/delete`
///
/// AJAX callers get `200` with the path to navigate to and no flash.
pub async fn delete_list(
    id: ListId,
    state: Arc<AppState>,
    mut session: Session,
    ajax: bool,
) -> HandlerResult {
    match session.lists_mut().delete_list(id) {
        Some(list) => tracing::info!(list_id = %id, list_name = %list.name, "{LIST_DELETED}"),
        None => tracing::debug!(list_id = %id, "deleting absent list"),
    }

    if ajax {
        Ok(finish(&state, session, AFTER_LIST_DELETE.into_response()))
    } else {
        Ok(done(&state, session, LIST_DELETED, "/lists"))
    }
}

/// `POST /lists/:id/todos`
pub async fn create_todo(
    id: ListId,
    state: Arc<AppState>,
    mut session: Session,
    form: TodoForm,
) -> HandlerResult {
    let created = session.lists_mut().create_todo(id, &form.todo).map(|todo| todo.id);
    match created {
        Ok(todo_id) => {
            tracing::info!(list_id = %id, todo_id = %todo_id, "{TODO_ADDED}");
            Ok(done(&state, session, TODO_ADDED, &list_path(id)))
        }
        Err(err) if err.is_validation() => {
            tracing::debug!(list_id = %id, %err, "todo name rejected");
            session.flash_mut().set_error(err.to_string());
            let rendered = match session.lists().find_list(id) {
                Ok(list) => state.views.list_page(session.flash(), list, &form.todo),
                Err(err) => return Ok(not_found(&state, session, &err, "/lists")),
            };
            page(&state, session, rendered)
        }
        Err(err) => Ok(not_found(&state, session, &err, "/lists")),
    }
}

/// `POST /lists/:id/todos/:todo_id/delete`
///
/// AJAX callers get `204` and no flash.
pub async fn delete_todo(
    id: ListId,
    todo_id: TodoId,
    state: Arc<AppState>,
    mut session: Session,
    ajax: bool,
) -> HandlerResult {
    match session.lists_mut().delete_todo(id, todo_id) {
        Ok(removed) => {
            if removed.is_some() {
                tracing::info!(list_id = %id, todo_id = %todo_id, "{TODO_DELETED}");
            }
            if ajax {
                Ok(finish(&state, session, StatusCode::NO_CONTENT.into_response()))
            } else {
                Ok(done(&state, session, TODO_DELETED, &list_path(id)))
            }
        }
        Err(err) => Ok(not_found(&state, session, &err, "/lists")),
    }
}

/// `POST /lists/:id/todos/:todo_id`
pub async fn update_todo(
    id: ListId,
    todo_id: TodoId,
    state: Arc<AppState>,
    mut session: Session,
    form: CompletionForm,
) -> HandlerResult {
    let completed = form.is_completed();
    match session.lists_mut().set_todo_completed(id, todo_id, completed) {
        Ok(()) => {
            tracing::info!(list_id = %id, todo_id = %todo_id, completed, "{TODO_UPDATED}");
            Ok(done(&state, session, TODO_UPDATED, &list_path(id)))
        }
        Err(err @ TodoError::TodoNotFound { .. }) => {
            Ok(not_found(&state, session, &err, &list_path(id)))
        }
        Err(err) => Ok(not_found(&state, session, &err, "/lists")),
    }
}

/// `POST /lists/:id/complete_all`
pub async fn complete_all(id: ListId, state: Arc<AppState>, mut session: Session) -> HandlerResult {
    match session.lists_mut().complete_all(id) {
        Ok(changed) => {
            tracing::info!(list_id = %id, changed, "{ALL_COMPLETED}");
            Ok(done(&state, session, ALL_COMPLETED, &list_path(id)))
        }
        Err(err) => Ok(not_found(&state, session, &err, "/lists")),
    }
}

/// Turn unmatched routes and server faults into error pages
///
/// # Errors
/// Never; every rejection becomes a response.
pub async fn recover(state: Arc<AppState>, rejection: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "The page you requested does not exist.")
    } else if let Some(err) = rejection.find::<ServerError>() {
        tracing::error!(error = %err.message, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.")
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed.")
    } else if rejection.find::<warp::filters::body::BodyDeserializeError>().is_some() {
        (StatusCode::BAD_REQUEST, "The submitted form could not be read.")
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "The submitted form is too large.")
    } else if rejection.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "The submitted form has no length.")
    } else {
        tracing::error!(?rejection, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.")
    };

    let response = match state.views.error_page(status.as_u16(), message) {
        Ok(body) => warp::reply::with_status(warp::reply::html(body), status).into_response(),
        Err(err) => {
            tracing::error!(%err, "error page failed to render");
            warp::reply::with_status(message, status).into_response()
        }
    };
    Ok(response)
}
