pub mod api;
pub mod config;
pub mod server;
pub mod state;
pub mod static_server;
pub mod toggle;

pub mod core {
    pub mod db;
    pub mod errors;
    pub mod helpers;
    pub mod query_params;
}

pub mod models {
    pub mod models;
}

pub mod components {
    pub mod avatar;
    pub mod composer;
    pub mod layout;
    pub mod nav_bar;
    pub mod post_card;
    pub mod profile_card;
}

pub mod pages {
    pub mod explore;
    pub mod home;
    pub mod profile;
}

use http::StatusCode;
use crate::core::errors::ApiError;
use crate::core::query_params::decode;
use crate::pages::{explore, home, profile};
use crate::state::AppState;

pub type Request = http::Request<Vec<u8>>;
pub type Response = http::Response<Vec<u8>>;

/// Route one request to its page, action or asset.
pub fn handle(req: Request, state: &AppState) -> anyhow::Result<Response> {
    let path = req.uri().path().to_string();
    let method = req.method().as_str().to_string();
    let segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(decode)
        .collect();
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => home::render_home(state),
        ("POST", ["posts"]) => home::create_post(&req, state),
        ("POST", ["home", "like", post_id]) => home::like_post(state, post_id),

        ("GET", ["explore"]) => explore::render_explore(&req, state),
        ("POST", ["explore", "like", post_id]) => explore::like_post(state, post_id),
        ("POST", ["explore", "follow", user_id]) => explore::follow_user(state, user_id),

        ("GET", ["profile", username]) => profile::render_profile(&req, state, username),
        ("POST", ["profile", username, "follow"]) => profile::follow_profile(state, username),
        ("POST", ["profile", username, "like", post_id]) => {
            profile::like_post(state, username, post_id)
        }

        ("GET", ["api", "feed"]) => api::feed(state),
        ("GET", ["api", "explore"]) => api::explore(state),
        ("GET", ["api", "profiles", username]) => api::profile(state, username),

        ("GET", ["healthcheck"]) => Ok(http::Response::builder()
            .status(StatusCode::OK)
            .body(b"ok".to_vec())?),
        ("GET", _) => static_server::serve_static(&path),
        _ => Ok(ApiError::NotFound("No route found".to_string()).into()),
    }
}
