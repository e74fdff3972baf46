use chrono::{DateTime, Utc};
use http::StatusCode;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use crate::components::composer::render_composer;
use crate::components::layout::{loading_head, render_loading, render_page};
use crate::components::nav_bar::render_nav_bar;
use crate::components::post_card::render_post_card;
use crate::config::MAX_POST_LENGTH;
use crate::core::db::{FixtureDb, CURRENT_USER_ID};
use crate::core::errors::ApiError;
use crate::core::helpers::{html_response, lock, new_local_id, now_iso, see_other};
use crate::core::query_params::{get_non_blank, parse_form};
use crate::models::models::{CurrentUser, Post, Profile};
use crate::state::AppState;
use crate::toggle::toggle_like;
use crate::{Request, Response};

/// Home feed state: the posts on screen and which of them the user liked.
pub struct HomePage {
    posts: Vec<Post>,
    liked: HashSet<String>,
    loading: bool,
    started: Instant,
    delay: Duration,
}

impl HomePage {
    /// Begin a page load; fixtures arrive once `delay` has passed.
    pub fn start(delay: Duration) -> Self {
        HomePage {
            posts: Vec::new(),
            liked: HashSet::new(),
            loading: true,
            started: Instant::now(),
            delay,
        }
    }

    pub fn poll(&mut self, db: &FixtureDb) {
        if self.loading && self.started.elapsed() >= self.delay {
            // Posts written during the load stay on top of the fixtures.
            self.posts.extend(db.home_feed());
            self.loading = false;
            log::debug!("home feed loaded with {} posts", self.posts.len());
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn is_liked(&self, post_id: &str) -> bool {
        self.liked.contains(post_id)
    }

    pub fn liked_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.liked.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn toggle_like(&mut self, post_id: &str) -> Option<bool> {
        toggle_like(&mut self.posts, &mut self.liked, post_id)
    }

    /// Prepend a post by `author`. Blank text is ignored and yields `None`.
    pub fn create_post(
        &mut self,
        author: &CurrentUser,
        content: &str,
        image_url: Option<String>,
    ) -> Option<&Post> {
        if content.trim().is_empty() {
            return None;
        }

        let now = now_iso();
        let post = Post {
            id: new_local_id(),
            user_id: CURRENT_USER_ID.to_string(),
            content: content.to_string(),
            image_url: image_url.filter(|url| !url.trim().is_empty()),
            likes_count: 0,
            comments_count: 0,
            created_at: now.clone(),
            profile: Profile {
                id: CURRENT_USER_ID.to_string(),
                username: author.username.clone(),
                full_name: author.full_name.clone(),
                bio: "New user".to_string(),
                avatar_url: author.avatar_url.clone().unwrap_or_default(),
                followers_count: 0,
                following_count: 0,
                created_at: now,
            },
        };

        self.posts.insert(0, post);
        self.posts.first()
    }

    fn render_main(&self, current_user: &CurrentUser, now: DateTime<Utc>) -> String {
        let mut html = String::from(r#"<div class="feed">"#);
        html.push_str(&render_composer(Some(current_user), ""));

        if self.loading {
            html.push_str(render_loading());
        } else {
            for post in &self.posts {
                let action = format!("/home/like/{}", urlencoding::encode(&post.id));
                html.push_str(&render_post_card(post, self.is_liked(&post.id), &action, now));
            }
        }

        html.push_str("</div>");
        html
    }
}

/// Run `f` against the home page, starting its load on first use.
pub fn with_page<R>(state: &AppState, f: impl FnOnce(&mut HomePage) -> R) -> anyhow::Result<R> {
    let mut slot = lock(&state.home, "home")?;
    let page = slot.get_or_insert_with(|| {
        log::debug!("starting home feed load");
        HomePage::start(state.config.home_load_delay)
    });
    page.poll(&state.db);
    Ok(f(page))
}

// === HTTP Handlers ===

pub fn render_home(state: &AppState) -> anyhow::Result<Response> {
    let current_user = state.db.current_user();
    let (loading, main) = with_page(state, |page| {
        (page.is_loading(), page.render_main(&current_user, Utc::now()))
    })?;

    let head = if loading { loading_head() } else { "" };
    let nav = render_nav_bar("/", Some(&current_user));
    html_response(StatusCode::OK, render_page("Home", head, &nav, &main)?)
}

pub fn create_post(req: &Request, state: &AppState) -> anyhow::Result<Response> {
    let form = parse_form(req.body());
    let content = form.get("content").map(String::as_str).unwrap_or_default();

    if content.trim().is_empty() {
        log::debug!("ignoring blank post submission");
        return see_other("/");
    }
    if content.chars().count() > MAX_POST_LENGTH {
        return Ok(ApiError::BadRequest("Invalid content".to_string()).into());
    }

    let image_url = get_non_blank(&form, "image_url");
    let current_user = state.db.current_user();
    with_page(state, |page| {
        if let Some(post) = page.create_post(&current_user, content, image_url) {
            log::debug!("created post {}", post.id);
        }
    })?;

    see_other("/")
}

pub fn like_post(state: &AppState, post_id: &str) -> anyhow::Result<Response> {
    match with_page(state, |page| page.toggle_like(post_id))? {
        Some(liked) => {
            log::debug!("home post {} liked={}", post_id, liked);
            see_other("/")
        }
        None => {
            log::warn!("like for unknown home post {}", post_id);
            Ok(ApiError::NotFound("Post not found".to_string()).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn loaded(db: &FixtureDb) -> HomePage {
        let mut page = HomePage::start(Duration::ZERO);
        page.poll(db);
        page
    }

    fn db() -> FixtureDb {
        FixtureDb::connect(&Config::default().database)
    }

    #[test]
    fn stays_loading_until_delay_elapses() {
        let db = db();
        let mut page = HomePage::start(Duration::from_secs(3600));
        page.poll(&db);
        assert!(page.is_loading());
        assert!(page.posts().is_empty());

        let page = loaded(&db);
        assert!(!page.is_loading());
        assert_eq!(page.posts().len(), 3);
    }

    #[test]
    fn blank_post_is_a_no_op() {
        let db = db();
        let mut page = loaded(&db);
        assert!(page.create_post(&db.current_user(), " \n\t ", None).is_none());
        assert_eq!(page.posts().len(), 3);
    }

    #[test]
    fn new_post_is_prepended_with_image_and_author() {
        let db = db();
        let mut page = loaded(&db);
        let created = page
            .create_post(&db.current_user(), "hello", Some("https://x.test/a.png".to_string()))
            .unwrap()
            .clone();

        assert_eq!(page.posts().len(), 4);
        assert_eq!(page.posts()[0], created);
        assert_eq!(created.content, "hello");
        assert_eq!(created.image_url.as_deref(), Some("https://x.test/a.png"));
        assert_eq!(created.likes_count, 0);
        assert_eq!(created.profile.username, "johndoe");
        assert_eq!(created.profile.bio, "New user");
        assert_eq!(created.user_id, CURRENT_USER_ID);
    }

    #[test]
    fn blank_image_reference_is_dropped() {
        let db = db();
        let mut page = loaded(&db);
        let created = page.create_post(&db.current_user(), "x", Some("  ".to_string())).unwrap();
        assert!(created.image_url.is_none());
    }

    #[test]
    fn post_during_load_survives_arrival() {
        let db = db();
        let mut page = HomePage::start(Duration::from_millis(20));
        page.create_post(&db.current_user(), "early", None);
        std::thread::sleep(Duration::from_millis(30));
        page.poll(&db);
        assert_eq!(page.posts().len(), 4);
        assert_eq!(page.posts()[0].content, "early");
    }

    #[test]
    fn like_toggles_count_and_mark() {
        let db = db();
        let mut page = loaded(&db);

        assert_eq!(page.toggle_like("1"), Some(true));
        assert!(page.is_liked("1"));
        assert_eq!(page.posts()[0].likes_count, 25);

        assert_eq!(page.toggle_like("1"), Some(false));
        assert!(!page.is_liked("1"));
        assert_eq!(page.posts()[0].likes_count, 24);
    }

    #[test]
    fn render_switches_from_spinner_to_cards() {
        let db = db();
        let user = db.current_user();
        let pending = HomePage::start(Duration::from_secs(3600));
        let html = pending.render_main(&user, Utc::now());
        assert!(html.contains("spinner"));
        assert!(!html.contains("post-card\" data-post-id"));

        let html = loaded(&db).render_main(&user, Utc::now());
        assert!(!html.contains("spinner"));
        assert_eq!(html.matches("data-post-id=").count(), 3);
        assert!(html.contains(r#"action="/home/like/2""#));
    }
}
