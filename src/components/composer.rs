use html_escape::encode_text;
use crate::components::avatar::{render_avatar, AvatarSize};
use crate::models::models::CurrentUser;

/// Post composer. The submit button starts disabled while `draft` is blank;
/// `static/app.js` keeps it in step with the textarea as the user types.
pub fn render_composer(current_user: Option<&CurrentUser>, draft: &str) -> String {
    let (avatar_src, username) = match current_user {
        Some(user) => (user.avatar_url.as_deref(), user.username.as_str()),
        None => (None, "User"),
    };
    let disabled = if draft.trim().is_empty() { " disabled" } else { "" };

    format!(
        r#"<section class="post-card composer" id="composer">
  <form method="post" action="/posts" class="composer-form">
    <div class="composer-row">
      {avatar}
      <div class="composer-fields">
        <textarea name="content" placeholder="What's on your mind?" data-composer-input>{draft}</textarea>
        <label class="composer-photo">&#128247; Photo
          <input type="url" name="image_url" placeholder="Image link (optional)">
        </label>
      </div>
    </div>
    <div class="composer-footer">
      <button type="submit" class="btn btn-hero" data-composer-submit{disabled}>Post</button>
    </div>
  </form>
</section>"#,
        avatar = render_avatar(avatar_src, username, None, AvatarSize::Md, None),
        draft = encode_text(draft),
        disabled = disabled,
    )
}
