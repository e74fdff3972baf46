use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub bio: String,
    pub avatar_url: String,
    pub followers_count: u32,
    pub following_count: u32,
    pub created_at: String,
}

/// A post carries a full copy of its author's profile.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub likes_count: u32,
    pub comments_count: u32,
    pub created_at: String,
    pub profile: Profile,
}

impl Post {
    pub fn has_image(&self) -> bool {
        self.image_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

#[allow(dead_code)]
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: String,
    pub profile: Profile,
}

#[allow(dead_code)]
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Like {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub created_at: String,
}

#[allow(dead_code)]
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Follow {
    pub id: String,
    pub follower_id: String,
    pub following_id: String,
    pub created_at: String,
}

/// Display fields of the signed-in user, cached by every page.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CurrentUser {
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TrendingTopic {
    pub tag: String,
    pub posts: u32,
}
