//! Static assets bundled into the binary

use warp::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

/// Delete confirmation and AJAX delete script
pub const APPLICATION_JS: &str = include_str!("../assets/application.js");

/// Page stylesheet
pub const APPLICATION_CSS: &str = include_str!("../assets/application.css");

fn asset(body: &'static str, content_type: &'static str) -> Response {
    let reply = warp::reply::with_header(body, CONTENT_TYPE, content_type);
    warp::reply::with_header(reply, CACHE_CONTROL, "public, max-age=3600").into_response()
}

/// `GET /javascripts/application.js` and `GET /stylesheets/application.css`
pub fn routes() -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let script = warp::path!("javascripts" / "application.js")
        .map(|| asset(APPLICATION_JS, "application/javascript; charset=utf-8"));
    let stylesheet = warp::path!("stylesheets" / "application.css")
        .map(|| asset(APPLICATION_CSS, "text/css; charset=utf-8"));

    warp::get().and(script.or(stylesheet).unify())
}
