//! Request driver for route tests
//!
//! Keeps the session cookie between requests the way a browser would.

#![allow(dead_code)]

use std::sync::Arc;
use todo_core::Lists;
use todo_session::SessionStore;
use todo_test_utils::{seed_session, session_store};
use todo_web::{routes, AppState};
use warp::http::header::{HeaderName, CONTENT_TYPE, LOCATION, SET_COOKIE};
use warp::http::StatusCode;
use warp::test::RequestBuilder;

pub const FORM_TYPE: &str = "application/x-www-form-urlencoded";

pub struct TestApp {
    pub state: Arc<AppState>,
    pub cookie: Option<String>,
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn assert_redirect(&self, location: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(location));
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(session_store())
    }

    pub fn with_store(store: SessionStore) -> Self {
        Self {
            state: Arc::new(AppState::new(store).unwrap()),
            cookie: None,
        }
    }

    /// App whose browser already holds a session with these lists
    pub fn with_lists(lists: Lists) -> Self {
        let store = session_store();
        let (_, cookie) = seed_session(&store, lists);
        let mut app = Self::with_store(store);
        app.cookie = Some(cookie);
        app
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(warp::test::request().method("GET").path(path)).await
    }

    pub async fn post(&mut self, path: &str, form: &str) -> TestResponse {
        let request = warp::test::request()
            .method("POST")
            .path(path)
            .header("content-type", FORM_TYPE)
            .body(form.to_string());
        self.send(request).await
    }

    pub async fn ajax_post(&mut self, path: &str) -> TestResponse {
        let request = warp::test::request()
            .method("POST")
            .path(path)
            .header("x-requested-with", "XMLHttpRequest")
            .body("");
        self.send(request).await
    }

    /// GET the location of a redirect
    pub async fn follow(&mut self, response: &TestResponse) -> TestResponse {
        let location = response.location.clone().expect("response is not a redirect");
        self.get(&location).await
    }

    async fn send(&mut self, request: RequestBuilder) -> TestResponse {
        let request = match &self.cookie {
            Some(cookie) => request.header("cookie", cookie.as_str()),
            None => request,
        };
        let res = request.reply(&routes(Arc::clone(&self.state))).await;

        let header = |name: HeaderName| {
            res.headers()
                .get(name)
                .map(|value| value.to_str().unwrap().to_string())
        };
        let response = TestResponse {
            status: res.status(),
            location: header(LOCATION),
            set_cookie: header(SET_COOKIE),
            content_type: header(CONTENT_TYPE),
            body: String::from_utf8(res.body().to_vec()).unwrap(),
        };

        if let Some(set_cookie) = &response.set_cookie {
            let pair = set_cookie.split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        response
    }
}
