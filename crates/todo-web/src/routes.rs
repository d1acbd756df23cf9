//! Route table
//!
//! Paths are matched before methods so a malformed id (`/lists/abc`) is a
//! plain 404 rather than a method mismatch on some other route.

use crate::assets;
use crate::handlers::{self, CompletionForm, ListForm, TodoForm};
use crate::logging;
use crate::state::AppState;
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::sync::Arc;
use todo_core::{ListId, TodoId};
use todo_session::{Session, SESSION_COOKIE};
use warp::filters::BoxedFilter;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

/// Largest accepted form body in bytes
pub const FORM_LIMIT: u64 = 16 * 1024;

/// Value of `X-Requested-With` sent by the delete script
pub const AJAX_HEADER_VALUE: &str = "XMLHttpRequest";

fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&state))
}

/// The request's session, resumed from its cookie or freshly started
fn with_session(state: Arc<AppState>) -> BoxedFilter<(Session,)> {
    warp::any()
        .and(warp::cookie::optional(SESSION_COOKIE))
        .map(move |cookie: Option<String>| state.sessions.open(cookie.as_deref()))
        .boxed()
}

fn is_ajax() -> BoxedFilter<(bool,)> {
    warp::header::optional::<String>("x-requested-with")
        .map(|value: Option<String>| {
            value.is_some_and(|v| v.eq_ignore_ascii_case(AJAX_HEADER_VALUE))
        })
        .boxed()
}

fn form<T>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
where
    T: DeserializeOwned + Send,
{
    warp::body::content_length_limit(FORM_LIMIT).and(warp::body::form())
}

fn list_routes(state: &Arc<AppState>) -> BoxedFilter<(Response,)> {
    let ctx = with_state(Arc::clone(state)).and(with_session(Arc::clone(state)));

    let index = warp::path!("lists")
        .and(warp::get())
        .and(ctx.clone())
        .and_then(handlers::show_lists);
    let new = warp::path!("lists" / "new")
        .and(warp::get())
        .and(ctx.clone())
        .and_then(handlers::new_list_form);
    let create = warp::path!("lists")
        .and(warp::post())
        .and(ctx.clone())
        .and(form::<ListForm>())
        .and_then(handlers::create_list);
    let show = warp::path!("lists" / ListId)
        .and(warp::get())
        .and(ctx.clone())
        .and_then(handlers::show_list);
    let edit = warp::path!("lists" / ListId / "edit")
        .and(warp::get())
        .and(ctx.clone())
        .and_then(handlers::edit_list_form);
    let update = warp::path!("lists" / ListId)
        .and(warp::post())
        .and(ctx.clone())
        .and(form::<ListForm>())
        .and_then(handlers::update_list);
    let delete = warp::path!("lists" / ListId / "delete")
        .and(warp::post())
        .and(ctx)
        .and(is_ajax())
        .and_then(handlers::delete_list);

    index
        .or(new)
        .unify()
        .or(create)
        .unify()
        .or(show)
        .unify()
        .or(edit)
        .unify()
        .or(update)
        .unify()
        .or(delete)
        .unify()
        .boxed()
}

fn todo_routes(state: &Arc<AppState>) -> BoxedFilter<(Response,)> {
    let ctx = with_state(Arc::clone(state)).and(with_session(Arc::clone(state)));

    let create = warp::path!("lists" / ListId / "todos")
        .and(warp::post())
        .and(ctx.clone())
        .and(form::<TodoForm>())
        .and_then(handlers::create_todo);
    let delete = warp::path!("lists" / ListId / "todos" / TodoId / "delete")
        .and(warp::post())
        .and(ctx.clone())
        .and(is_ajax())
        .and_then(handlers::delete_todo);
    let update = warp::path!("lists" / ListId / "todos" / TodoId)
        .and(warp::post())
        .and(ctx.clone())
        .and(form::<CompletionForm>())
        .and_then(handlers::update_todo);
    let complete_all = warp::path!("lists" / ListId / "complete_all")
        .and(warp::post())
        .and(ctx)
        .and_then(handlers::complete_all);

    create
        .or(delete)
        .unify()
        .or(update)
        .unify()
        .or(complete_all)
        .unify()
        .boxed()
}

/// Every route of the application, with error pages and request logging
pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let root = warp::path::end().and(warp::get()).and_then(handlers::root);

    let recover_state = Arc::clone(&state);
    root.or(list_routes(&state))
        .unify()
        .or(todo_routes(&state))
        .unify()
        .or(assets::routes())
        .unify()
        .recover(move |rejection: Rejection| {
            handlers::recover(Arc::clone(&recover_state), rejection)
        })
        .unify()
        .with(warp::log::custom(logging::log_request))
}
