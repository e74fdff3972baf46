use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};
use regex::Regex;
use std::sync::OnceLock;
use crate::components::avatar::{render_avatar, AvatarSize};
use crate::core::helpers::time_ago;
use crate::models::models::Post;

fn url_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"https?://[^\s<>]+").expect("Regex should compile")
    })
}

/// Escape post text and turn HTTP/HTTPS URLs into links.
pub fn format_post_content(content: &str) -> String {
    let mut html = String::with_capacity(content.len());
    let mut last = 0;

    for url in url_regex().find_iter(content) {
        html.push_str(&encode_text(&content[last..url.start()]));
        html.push_str(&format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            encode_double_quoted_attribute(url.as_str()),
            encode_text(url.as_str()),
        ));
        last = url.end();
    }
    html.push_str(&encode_text(&content[last..]));

    html
}

/// One post in a feed. Liking submits a form to `like_action`.
pub fn render_post_card(post: &Post, is_liked: bool, like_action: &str, now: DateTime<Utc>) -> String {
    let author = &post.profile;

    let image = match post.image_url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => format!(
            r#"<div class="post-image"><img src="{}" alt="Post image"></div>"#,
            encode_double_quoted_attribute(url)
        ),
        None => String::new(),
    };

    let liked_class = if is_liked { " liked" } else { "" };

    format!(
        r#"<article class="post-card" data-post-id="{id}">
  <header class="post-header">
    <a class="post-author" href="/profile/{profile_path}">
      {avatar}
      <div>
        <h3 class="author-name">{full_name}</h3>
        <p class="author-handle">@{username}</p>
      </div>
    </a>
    <div class="post-meta">
      <time datetime="{created_at}">{ago}</time>
      <button type="button" class="btn btn-ghost btn-icon" aria-label="More">&#8943;</button>
    </div>
  </header>
  <div class="post-body">
    <p class="post-content">{content}</p>
    {image}
  </div>
  <footer class="post-actions">
    <div class="post-counters">
      <form method="post" action="{like_action}" class="inline-form">
        <button type="submit" class="btn btn-like{liked_class}" data-liked="{is_liked}" aria-pressed="{is_liked}">&#9829; <span class="likes-count">{likes}</span></button>
      </form>
      <button type="button" class="btn btn-ghost" aria-label="Comments">&#128172; <span class="comments-count">{comments}</span></button>
    </div>
    <button type="button" class="btn btn-ghost" aria-label="Share">&#8599;</button>
  </footer>
</article>"#,
        id = encode_double_quoted_attribute(&post.id),
        profile_path = encode_double_quoted_attribute(&urlencoding::encode(&author.username)),
        avatar = render_avatar(
            Some(author.avatar_url.as_str()),
            &author.username,
            Some(author.full_name.as_str()),
            AvatarSize::Md,
            None,
        ),
        full_name = encode_text(&author.full_name),
        username = encode_text(&author.username),
        created_at = encode_double_quoted_attribute(&post.created_at),
        ago = encode_text(&time_ago(&post.created_at, now)),
        content = format_post_content(&post.content),
        image = image,
        like_action = encode_double_quoted_attribute(like_action),
        liked_class = liked_class,
        is_liked = is_liked,
        likes = post.likes_count,
        comments = post.comments_count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::db::FixtureDb;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 20, 30, 0).unwrap()
    }

    #[test]
    fn links_are_escaped_and_clickable() {
        let html = format_post_content("see https://x.test/?a=1&b=<2> <now>");
        assert_eq!(
            html,
            r#"see <a href="https://x.test/?a=1&amp;b=" target="_blank" rel="noopener noreferrer">https://x.test/?a=1&amp;b=</a>&lt;2&gt; &lt;now&gt;"#
        );
    }

    #[test]
    fn card_shows_counts_image_and_like_state() {
        let db = FixtureDb::connect(&Config::default().database);
        let post = &db.home_feed()[0];

        let html = render_post_card(post, true, "/home/like/1", now());
        assert!(html.contains("Alex Thompson"));
        assert!(html.contains("@fitguru"));
        assert!(html.contains(r#"<span class="likes-count">24</span>"#));
        assert!(html.contains(r#"<span class="comments-count">5</span>"#));
        assert!(html.contains(r#"data-liked="true""#));
        assert!(html.contains(r#"action="/home/like/1""#));
        assert!(html.contains("post-image"));
        assert!(html.contains("about 10 hours ago"));
    }

    #[test]
    fn card_without_image_has_no_image_block() {
        let db = FixtureDb::connect(&Config::default().database);
        let post = &db.home_feed()[2];

        let html = render_post_card(post, false, "/home/like/3", now());
        assert!(!html.contains("post-image"));
        assert!(html.contains(r#"data-liked="false""#));
        assert!(html.contains("I can&#x27;t wait") || html.contains("I can't wait"));
    }
}
