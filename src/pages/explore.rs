use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};
use http::StatusCode;
use std::collections::HashSet;
use crate::components::avatar::{render_avatar, AvatarSize};
use crate::components::layout::{render_empty, render_page};
use crate::components::nav_bar::render_nav_bar;
use crate::components::post_card::render_post_card;
use crate::core::db::FixtureDb;
use crate::core::errors::ApiError;
use crate::core::helpers::{html_response, lock, see_other};
use crate::core::query_params::parse_query_params;
use crate::models::models::{Post, Profile, TrendingTopic};
use crate::state::AppState;
use crate::toggle::{toggle_follow, toggle_like};
use crate::{Request, Response};

pub struct ExplorePage {
    posts: Vec<Post>,
    suggested: Vec<Profile>,
    topics: Vec<TrendingTopic>,
    liked: HashSet<String>,
    followed: HashSet<String>,
    query: String,
}

fn matches(query: &str, fields: &[&str]) -> bool {
    query.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(query))
}

impl ExplorePage {
    pub fn load(db: &FixtureDb) -> Self {
        ExplorePage {
            posts: db.trending_posts(),
            suggested: db.suggested_users(),
            topics: db.trending_topics(),
            liked: HashSet::new(),
            followed: HashSet::new(),
            query: String::new(),
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    fn needle(&self) -> String {
        self.query.to_lowercase()
    }

    pub fn visible_posts(&self) -> Vec<&Post> {
        let needle = self.needle();
        self.posts
            .iter()
            .filter(|p| matches(
                &needle,
                &[p.content.as_str(), p.profile.username.as_str(), p.profile.full_name.as_str()],
            ))
            .collect()
    }

    pub fn visible_users(&self) -> Vec<&Profile> {
        let needle = self.needle();
        self.suggested
            .iter()
            .filter(|u| matches(&needle, &[u.username.as_str(), u.full_name.as_str(), u.bio.as_str()]))
            .collect()
    }

    pub fn visible_topics(&self) -> Vec<&TrendingTopic> {
        let needle = self.needle();
        let needle = needle.trim_start_matches('#');
        self.topics.iter().filter(|t| matches(needle, &[t.tag.as_str()])).collect()
    }

    pub fn suggested_users(&self) -> &[Profile] {
        &self.suggested
    }

    pub fn is_liked(&self, post_id: &str) -> bool {
        self.liked.contains(post_id)
    }

    pub fn is_following(&self, user_id: &str) -> bool {
        self.followed.contains(user_id)
    }

    pub fn liked_ids(&self) -> Vec<&str> {
        sorted(&self.liked)
    }

    pub fn followed_ids(&self) -> Vec<&str> {
        sorted(&self.followed)
    }

    pub fn toggle_like(&mut self, post_id: &str) -> Option<bool> {
        toggle_like(&mut self.posts, &mut self.liked, post_id)
    }

    pub fn toggle_follow(&mut self, user_id: &str) -> Option<bool> {
        toggle_follow(&mut self.suggested, &mut self.followed, user_id)
    }

    fn render_main(&self, now: DateTime<Utc>) -> String {
        let posts = self.visible_posts();
        let posts_html = if posts.is_empty() {
            render_empty("No posts match your search")
        } else {
            posts
                .iter()
                .map(|post| {
                    let action = format!("/explore/like/{}", urlencoding::encode(&post.id));
                    render_post_card(post, self.is_liked(&post.id), &action, now)
                })
                .collect()
        };

        let topics_html: String = self
            .visible_topics()
            .iter()
            .map(|topic| {
                format!(
                    r#"<div class="topic"><div><p class="topic-tag">#{}</p><p class="author-handle">{} posts</p></div></div>"#,
                    encode_text(&topic.tag),
                    topic.posts
                )
            })
            .collect();

        let users_html: String = self
            .visible_users()
            .iter()
            .map(|user| self.render_suggested_user(user))
            .collect();

        format!(
            r#"<div class="explore">
  <div class="feed">
    <form method="get" action="/explore" class="search">
      <input type="search" name="q" value="{query}" placeholder="Search posts, users, and topics...">
    </form>
    <h2 class="section-title">&#128200; Trending Posts</h2>
    {posts}
  </div>
  <aside class="sidebar feed">
    <section class="post-card">
      <h3 class="section-title"># Trending Topics</h3>
      {topics}
    </section>
    <section class="post-card">
      <h3 class="section-title">&#128101; Who to Follow</h3>
      {users}
    </section>
  </aside>
</div>"#,
            query = encode_double_quoted_attribute(&self.query),
            posts = posts_html,
            topics = topics_html,
            users = users_html,
        )
    }

    fn render_suggested_user(&self, user: &Profile) -> String {
        let following = self.is_following(&user.id);
        let (class, label) = if following {
            ("btn btn-outline btn-sm", "Following")
        } else {
            ("btn btn-follow btn-sm", "Follow")
        };

        format!(
            r#"<div class="suggested-user" data-user-id="{id}">
  <a class="who" href="/profile/{path}">
    {avatar}
    <div><p class="author-name">{full_name}</p><p class="author-handle">@{username}</p></div>
  </a>
  <form method="post" action="/explore/follow/{path_id}" class="inline-form">
    <button type="submit" class="{class}" data-following="{following}">{label}</button>
  </form>
</div>"#,
            id = encode_double_quoted_attribute(&user.id),
            path = encode_double_quoted_attribute(&urlencoding::encode(&user.username)),
            avatar = render_avatar(Some(user.avatar_url.as_str()), &user.username, None, AvatarSize::Sm, None),
            full_name = encode_text(&user.full_name),
            username = encode_text(&user.username),
            path_id = encode_double_quoted_attribute(&urlencoding::encode(&user.id)),
            class = class,
            following = following,
            label = label,
        )
    }
}

fn sorted(set: &HashSet<String>) -> Vec<&str> {
    let mut ids: Vec<&str> = set.iter().map(String::as_str).collect();
    ids.sort_unstable();
    ids
}

pub fn with_page<R>(state: &AppState, f: impl FnOnce(&mut ExplorePage) -> R) -> anyhow::Result<R> {
    let mut slot = lock(&state.explore, "explore")?;
    let page = slot.get_or_insert_with(|| ExplorePage::load(&state.db));
    Ok(f(page))
}

// === HTTP Handlers ===

pub fn render_explore(req: &Request, state: &AppState) -> anyhow::Result<Response> {
    let params = parse_query_params(&req.uri().to_string());
    let main = with_page(state, |page| {
        if let Some(query) = params.get("q") {
            page.set_query(query);
        }
        page.render_main(Utc::now())
    })?;

    let nav = render_nav_bar("/explore", Some(&state.db.current_user()));
    html_response(StatusCode::OK, render_page("Explore", "", &nav, &main)?)
}

pub fn like_post(state: &AppState, post_id: &str) -> anyhow::Result<Response> {
    match with_page(state, |page| page.toggle_like(post_id))? {
        Some(liked) => {
            log::debug!("explore post {} liked={}", post_id, liked);
            see_other("/explore")
        }
        None => {
            log::warn!("like for unknown explore post {}", post_id);
            Ok(ApiError::NotFound("Post not found".to_string()).into())
        }
    }
}

pub fn follow_user(state: &AppState, user_id: &str) -> anyhow::Result<Response> {
    match with_page(state, |page| page.toggle_follow(user_id))? {
        Some(following) => {
            log::debug!("suggested user {} following={}", user_id, following);
            see_other("/explore")
        }
        None => {
            log::warn!("follow for unknown suggested user {}", user_id);
            Ok(ApiError::NotFound("Target user not found".to_string()).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn page() -> ExplorePage {
        ExplorePage::load(&FixtureDb::connect(&Config::default().database))
    }

    #[test]
    fn empty_query_shows_everything() {
        let page = page();
        assert_eq!(page.visible_posts().len(), 2);
        assert_eq!(page.visible_users().len(), 3);
        assert_eq!(page.visible_topics().len(), 5);
    }

    #[test]
    fn search_filters_case_insensitively() {
        let mut page = page();
        page.set_query("  STREET art ");
        assert_eq!(page.query(), "STREET art");
        let posts = page.visible_posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "trending-2");

        page.set_query("#travel");
        assert_eq!(page.visible_topics().len(), 1);
        page.set_query("travel");
        assert_eq!(page.visible_users()[0].username, "travel_nomad");
    }

    #[test]
    fn follow_is_symmetric_on_followers_count() {
        let mut page = page();
        assert_eq!(page.toggle_follow("6"), Some(true));
        assert!(page.is_following("6"));
        assert_eq!(page.suggested_users()[0].followers_count, 4568);
        assert_eq!(page.toggle_follow("6"), Some(false));
        assert_eq!(page.suggested_users()[0].followers_count, 4567);
        assert_eq!(page.toggle_follow("nobody"), None);
    }

    #[test]
    fn render_marks_liked_and_followed() {
        let mut page = page();
        page.toggle_like("trending-1");
        page.toggle_follow("7");
        let html = page.render_main(Utc::now());

        assert!(html.contains(r#"<span class="likes-count">343</span>"#));
        assert!(html.contains(r#"data-liked="true""#));
        assert!(html.contains(r#"action="/explore/follow/7""#));
        assert_eq!(html.matches(">Following</button>").count(), 1);
        assert_eq!(html.matches(">Follow</button>").count(), 2);
    }
}
