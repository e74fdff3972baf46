use html_escape::encode_double_quoted_attribute;
use crate::components::avatar::{render_avatar, AvatarSize};
use crate::models::models::CurrentUser;

fn nav_link(href: &str, label: &str, icon: &str, current_path: &str) -> String {
    let variant = if current_path == href { "btn-default active" } else { "btn-ghost" };
    format!(
        r#"<a href="{}" class="btn btn-sm {}">{} <span>{}</span></a>"#,
        href, variant, icon, label
    )
}

/// Top bar. A link is highlighted only when `current_path` equals its target.
pub fn render_nav_bar(current_path: &str, current_user: Option<&CurrentUser>) -> String {
    let user_menu = match current_user {
        Some(user) => format!(
            r#"<a href="/profile/{}" class="nav-avatar" aria-label="Your profile">{}</a>"#,
            encode_double_quoted_attribute(&urlencoding::encode(&user.username)),
            render_avatar(user.avatar_url.as_deref(), &user.username, None, AvatarSize::Sm, Some("clickable")),
        ),
        None => concat!(
            r#"<a href="/login" class="btn btn-ghost btn-sm">Login</a>"#,
            r#"<a href="/register" class="btn btn-hero btn-sm">Sign Up</a>"#,
        )
        .to_string(),
    };

    format!(
        r#"<nav class="nav-bar">
  <div class="container nav-inner">
    <a href="/" class="nav-logo"><span class="logo-mark">S</span><span class="logo-text">Social</span></a>
    <div class="nav-links">
      {home}
      {explore}
      <button type="button" class="btn btn-ghost btn-sm">&#128276; <span>Notifications</span></button>
    </div>
    <div class="nav-user">
      <a href="/#composer" class="btn btn-hero btn-sm">+ <span>Post</span></a>
      {user_menu}
    </div>
  </div>
</nav>"#,
        home = nav_link("/", "Home", "&#8962;", current_path),
        explore = nav_link("/explore", "Explore", "&#128269;", current_path),
        user_menu = user_menu,
    )
}
