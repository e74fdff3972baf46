use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};
use crate::components::avatar::{render_avatar, AvatarSize};
use crate::core::helpers::time_ago;
use crate::models::models::Profile;

pub fn render_profile_card(
    profile: &Profile,
    is_own_profile: bool,
    is_following: bool,
    follow_action: &str,
    now: DateTime<Utc>,
) -> String {
    let bio = if profile.bio.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="profile-bio">{}</p>"#, encode_text(&profile.bio))
    };

    let action = if is_own_profile {
        r#"<button type="button" class="btn btn-outline">Edit Profile</button>"#.to_string()
    } else {
        let (class, label) = if is_following {
            ("btn btn-outline", "Following")
        } else {
            ("btn btn-follow", "Follow")
        };
        format!(
            r#"<form method="post" action="{}" class="inline-form"><button type="submit" class="{}" data-following="{}">{}</button></form>"#,
            encode_double_quoted_attribute(follow_action),
            class,
            is_following,
            label,
        )
    };

    format!(
        r#"<section class="post-card profile-card" data-profile-id="{id}">
  {avatar}
  <div class="profile-details">
    <h1 class="profile-name">{full_name}</h1>
    <p class="author-handle">@{username}</p>
    {bio}
    <p class="profile-joined">Joined {joined}</p>
    <div class="profile-counts">
      <div><span class="count following-count">{following}</span> <span class="count-label">Following</span></div>
      <div><span class="count followers-count">{followers}</span> <span class="count-label">Followers</span></div>
    </div>
    <div class="profile-action">{action}</div>
  </div>
</section>"#,
        id = encode_double_quoted_attribute(&profile.id),
        avatar = render_avatar(
            Some(profile.avatar_url.as_str()),
            &profile.username,
            Some(profile.full_name.as_str()),
            AvatarSize::Xl,
            Some("profile-avatar"),
        ),
        full_name = encode_text(&profile.full_name),
        username = encode_text(&profile.username),
        bio = bio,
        joined = encode_text(&time_ago(&profile.created_at, now)),
        following = profile.following_count,
        followers = profile.followers_count,
        action = action,
    )
}
