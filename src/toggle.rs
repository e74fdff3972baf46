use std::collections::HashSet;
use crate::models::models::{Post, Profile};

/// Flip `id` in `marked` and move the paired counter with it.
///
/// Applied immediately and unconditionally: there is nothing to confirm with
/// and nothing to roll back. Returns whether `id` is marked afterwards.
pub fn toggle_membership(marked: &mut HashSet<String>, id: &str, counter: &mut u32) -> bool {
    if marked.remove(id) {
        *counter = counter.saturating_sub(1);
        false
    } else {
        marked.insert(id.to_string());
        *counter = counter.saturating_add(1);
        true
    }
}

/// Like or unlike `post_id` within `posts`. `None` if no such post is shown.
pub fn toggle_like(posts: &mut [Post], liked: &mut HashSet<String>, post_id: &str) -> Option<bool> {
    let post = posts.iter_mut().find(|p| p.id == post_id)?;
    Some(toggle_membership(liked, post_id, &mut post.likes_count))
}

/// Follow or unfollow `user_id` within `profiles`. `None` if unknown.
pub fn toggle_follow(
    profiles: &mut [Profile],
    followed: &mut HashSet<String>,
    user_id: &str,
) -> Option<bool> {
    let profile = profiles.iter_mut().find(|p| p.id == user_id)?;
    Some(toggle_membership(followed, user_id, &mut profile.followers_count))
}
