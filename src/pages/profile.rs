use chrono::{DateTime, Utc};
use html_escape::encode_double_quoted_attribute;
use http::StatusCode;
use serde::Serialize;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use crate::components::layout::{loading_head, render_empty, render_loading, render_page};
use crate::components::nav_bar::render_nav_bar;
use crate::components::post_card::render_post_card;
use crate::components::profile_card::render_profile_card;
use crate::core::db::FixtureDb;
use crate::core::errors::ApiError;
use crate::core::helpers::{html_response, lock, see_other};
use crate::core::query_params::parse_query_params;
use crate::models::models::{Post, Profile};
use crate::state::AppState;
use crate::toggle::{toggle_like, toggle_membership};
use crate::{Request, Response};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Posts,
    Media,
    Likes,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Posts, Tab::Media, Tab::Likes];

    /// Unrecognised values fall back to the posts tab.
    pub fn parse(value: &str) -> Tab {
        match value.trim().to_ascii_lowercase().as_str() {
            "media" => Tab::Media,
            "likes" => Tab::Likes,
            _ => Tab::Posts,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Posts => "posts",
            Tab::Media => "media",
            Tab::Likes => "likes",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Tab::Posts => "Posts",
            Tab::Media => "Media",
            Tab::Likes => "Likes",
        }
    }
}

/// State of one known user's profile page.
pub struct ProfilePage {
    username: String,
    is_own: bool,
    profile: Option<Profile>,
    posts: Vec<Post>,
    followed: HashSet<String>,
    liked: HashSet<String>,
    tab: Tab,
    started: Instant,
    delay: Duration,
}

impl ProfilePage {
    pub fn start(username: &str, is_own: bool, delay: Duration) -> Self {
        ProfilePage {
            username: username.to_string(),
            is_own,
            profile: None,
            posts: Vec::new(),
            followed: HashSet::new(),
            liked: HashSet::new(),
            tab: Tab::Posts,
            started: Instant::now(),
            delay,
        }
    }

    pub fn poll(&mut self, db: &FixtureDb) {
        if self.profile.is_some() || self.started.elapsed() < self.delay {
            return;
        }
        let Some(profile) = db.find_profile(&self.username) else {
            return;
        };

        self.posts = db.posts_by(&self.username);
        // Nothing says whether we already follow them; a coin flip decides.
        if !self.is_own && rand::random::<bool>() {
            self.followed.insert(profile.id.clone());
        }
        log::debug!("profile {} loaded with {} posts", self.username, self.posts.len());
        self.profile = Some(profile);
    }

    pub fn is_loading(&self) -> bool {
        self.profile.is_none()
    }

    pub fn is_own(&self) -> bool {
        self.is_own
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn is_following(&self) -> bool {
        self.profile
            .as_ref()
            .is_some_and(|p| self.followed.contains(&p.id))
    }

    pub fn is_liked(&self, post_id: &str) -> bool {
        self.liked.contains(post_id)
    }

    pub fn liked_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.liked.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Posts shown under the active tab.
    pub fn visible_posts(&self) -> Vec<&Post> {
        match self.tab {
            Tab::Posts => self.posts.iter().collect(),
            Tab::Media => self.posts.iter().filter(|p| p.has_image()).collect(),
            Tab::Likes => self.posts.iter().filter(|p| self.is_liked(&p.id)).collect(),
        }
    }

    /// `None` while the profile has not arrived yet.
    pub fn toggle_follow(&mut self) -> Option<bool> {
        let profile = self.profile.as_mut()?;
        Some(toggle_membership(&mut self.followed, &profile.id, &mut profile.followers_count))
    }

    pub fn toggle_like(&mut self, post_id: &str) -> Option<bool> {
        toggle_like(&mut self.posts, &mut self.liked, post_id)
    }

    fn base_path(&self) -> String {
        format!("/profile/{}", urlencoding::encode(&self.username))
    }

    fn render_main(&self, now: DateTime<Utc>) -> String {
        let Some(profile) = &self.profile else {
            return render_loading().to_string();
        };

        let base = self.base_path();
        let card = render_profile_card(
            profile,
            self.is_own,
            self.is_following(),
            &format!("{}/follow", base),
            now,
        );

        let tabs: String = Tab::ALL
            .iter()
            .map(|tab| {
                let active = if *tab == self.tab { " active" } else { "" };
                format!(
                    r#"<a class="tab{}" href="{}?tab={}">{}</a>"#,
                    active,
                    encode_double_quoted_attribute(&base),
                    tab.as_str(),
                    tab.label()
                )
            })
            .collect();

        let content = self.render_tab_content(&base, now);

        format!(
            r#"<div class="feed">{card}<nav class="tabs" data-active-tab="{active}">{tabs}</nav><div class="tab-content">{content}</div></div>"#,
            card = card,
            active = self.tab.as_str(),
            tabs = tabs,
            content = content,
        )
    }

    fn render_tab_content(&self, base: &str, now: DateTime<Utc>) -> String {
        let posts = self.visible_posts();

        match self.tab {
            Tab::Media if posts.is_empty() => render_empty("No media yet"),
            Tab::Media => {
                let images: String = posts
                    .iter()
                    .filter_map(|p| p.image_url.as_deref())
                    .map(|url| {
                        format!(
                            r#"<img src="{}" alt="Post media">"#,
                            encode_double_quoted_attribute(url)
                        )
                    })
                    .collect();
                format!(r#"<div class="media-grid">{}</div>"#, images)
            }
            Tab::Posts if posts.is_empty() => render_empty("No posts yet"),
            Tab::Likes if posts.is_empty() => render_empty("Liked posts appear here"),
            Tab::Posts | Tab::Likes => posts
                .iter()
                .map(|post| {
                    let action = format!("{}/like/{}", base, urlencoding::encode(&post.id));
                    render_post_card(post, self.is_liked(&post.id), &action, now)
                })
                .collect(),
        }
    }
}

/// Outcome of looking up a profile page by username.
pub enum Lookup<R> {
    Found(R),
    Unknown,
}

/// Run `f` against the page for `username`, creating it on first visit.
/// Usernames without a fixture get no state at all.
pub fn with_page<R>(
    state: &AppState,
    username: &str,
    f: impl FnOnce(&mut ProfilePage) -> R,
) -> anyhow::Result<Lookup<R>> {
    if state.db.find_profile(username).is_none() {
        return Ok(Lookup::Unknown);
    }

    let mut pages = lock(&state.profiles, "profile")?;
    let page = pages.entry(username.to_string()).or_insert_with(|| {
        let is_own = state.db.current_user().username == username;
        ProfilePage::start(username, is_own, state.config.profile_load_delay)
    });
    page.poll(&state.db);
    Ok(Lookup::Found(f(page)))
}

fn not_found_main() -> &'static str {
    r#"<div class="feed"><div class="not-found"><h1>User not found</h1><p>The profile you're looking for doesn't exist.</p></div></div>"#
}

// === HTTP Handlers ===

pub fn render_profile(req: &Request, state: &AppState, username: &str) -> anyhow::Result<Response> {
    let params = parse_query_params(&req.uri().to_string());
    let path = format!("/profile/{}", urlencoding::encode(username));
    let nav = render_nav_bar(&path, Some(&state.db.current_user()));

    let lookup = with_page(state, username, |page| {
        if let Some(tab) = params.get("tab") {
            page.set_tab(Tab::parse(tab));
        }
        let title = page
            .profile()
            .map(|p| p.full_name.clone())
            .unwrap_or_else(|| username.to_string());
        (page.is_loading(), title, page.render_main(Utc::now()))
    })?;

    match lookup {
        Lookup::Found((loading, title, main)) => {
            let head = if loading { loading_head() } else { "" };
            html_response(StatusCode::OK, render_page(&title, head, &nav, &main)?)
        }
        Lookup::Unknown => {
            log::warn!("profile requested for unknown user {}", username);
            html_response(
                StatusCode::NOT_FOUND,
                render_page("User not found", "", &nav, not_found_main())?,
            )
        }
    }
}

pub fn follow_profile(state: &AppState, username: &str) -> anyhow::Result<Response> {
    let lookup = with_page(state, username, |page| {
        if page.is_own() {
            return Err(ApiError::BadRequest("Cannot follow yourself".to_string()));
        }
        page.toggle_follow()
            .ok_or_else(|| ApiError::BadRequest("Profile is still loading".to_string()))
    })?;

    match lookup {
        Lookup::Found(Ok(following)) => {
            log::debug!("profile {} following={}", username, following);
            see_other(&format!("/profile/{}", urlencoding::encode(username)))
        }
        Lookup::Found(Err(err)) => Ok(err.into()),
        Lookup::Unknown => Ok(ApiError::NotFound("User not found".to_string()).into()),
    }
}

pub fn like_post(state: &AppState, username: &str, post_id: &str) -> anyhow::Result<Response> {
    match with_page(state, username, |page| page.toggle_like(post_id))? {
        Lookup::Found(Some(liked)) => {
            log::debug!("profile {} post {} liked={}", username, post_id, liked);
            see_other(&format!("/profile/{}", urlencoding::encode(username)))
        }
        Lookup::Found(None) => Ok(ApiError::NotFound("Post not found".to_string()).into()),
        Lookup::Unknown => Ok(ApiError::NotFound("User not found".to_string()).into()),
    }
}
