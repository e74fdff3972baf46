use serde::Serialize;
use crate::core::errors::ApiError;
use crate::core::helpers::json_response;
use crate::models::models::{Post, Profile, TrendingTopic};
use crate::pages::profile::{Lookup, Tab};
use crate::pages::{explore, home, profile};
use crate::state::AppState;
use crate::Response;

#[derive(Serialize)]
struct FeedSnapshot<'a> {
    loading: bool,
    posts: &'a [Post],
    liked_post_ids: Vec<&'a str>,
}

#[derive(Serialize)]
struct ExploreSnapshot<'a> {
    query: &'a str,
    posts: Vec<&'a Post>,
    suggested_users: Vec<&'a Profile>,
    trending_topics: Vec<&'a TrendingTopic>,
    liked_post_ids: Vec<&'a str>,
    followed_user_ids: Vec<&'a str>,
}

#[derive(Serialize)]
struct ProfileSnapshot<'a> {
    loading: bool,
    is_own_profile: bool,
    is_following: bool,
    tab: Tab,
    profile: Option<&'a Profile>,
    posts: Vec<&'a Post>,
    liked_post_ids: Vec<&'a str>,
}

pub fn feed(state: &AppState) -> anyhow::Result<Response> {
    home::with_page(state, |page| {
        json_response(&FeedSnapshot {
            loading: page.is_loading(),
            posts: page.posts(),
            liked_post_ids: page.liked_ids(),
        })
    })?
}

pub fn explore(state: &AppState) -> anyhow::Result<Response> {
    explore::with_page(state, |page| {
        json_response(&ExploreSnapshot {
            query: page.query(),
            posts: page.visible_posts(),
            suggested_users: page.visible_users(),
            trending_topics: page.visible_topics(),
            liked_post_ids: page.liked_ids(),
            followed_user_ids: page.followed_ids(),
        })
    })?
}

pub fn profile(state: &AppState, username: &str) -> anyhow::Result<Response> {
    let lookup = profile::with_page(state, username, |page| {
        json_response(&ProfileSnapshot {
            loading: page.is_loading(),
            is_own_profile: page.is_own(),
            is_following: page.is_following(),
            tab: page.tab(),
            profile: page.profile(),
            posts: page.visible_posts(),
            liked_post_ids: page.liked_ids(),
        })
    })?;

    match lookup {
        Lookup::Found(response) => response,
        Lookup::Unknown => Ok(ApiError::NotFound("User not found".to_string()).into()),
    }
}
