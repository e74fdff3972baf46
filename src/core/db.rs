use crate::config::DatabaseConfig;
use crate::models::models::{CurrentUser, Post, Profile, TrendingTopic};

const JOHN_AVATAR: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face";
const ALEX_AVATAR: &str =
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face";
const SARAH_AVATAR: &str =
    "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=150&h=150&fit=crop&crop=face";
const MIKE_AVATAR: &str =
    "https://images.unsplash.com/photo-1560250097-0b93528c311a?w=150&h=150&fit=crop&crop=face";
const EMMA_AVATAR: &str =
    "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150&h=150&fit=crop&crop=face";

const WORKOUT_IMAGE: &str =
    "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=600&h=400&fit=crop";
const SUNSET_IMAGE: &str =
    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=600&h=400&fit=crop";

pub const CURRENT_USER_ID: &str = "current-user";

/// Fixture-backed stand-in for the hosted database client.
///
/// Every accessor hands out fresh owned copies, so a page can mutate what it
/// receives without affecting any other page.
pub struct FixtureDb;

impl FixtureDb {
    pub fn connect(config: &DatabaseConfig) -> Self {
        log::info!(
            "using fixture data in place of database at {} (key {})",
            config.url,
            config.redacted_key()
        );
        FixtureDb
    }

    pub fn current_user(&self) -> CurrentUser {
        CurrentUser {
            username: "johndoe".to_string(),
            full_name: "John Doe".to_string(),
            avatar_url: Some(JOHN_AVATAR.to_string()),
        }
    }

    pub fn home_feed(&self) -> Vec<Post> {
        let alex = profile(
            "1", "fitguru", "Alex Thompson",
            "Fitness enthusiast and personal trainer",
            ALEX_AVATAR, 1250, 320, "2023-06-01T00:00:00Z",
        );
        let sarah = profile(
            "2", "naturelover", "Sarah Johnson",
            "Adventure seeker | Photographer | Mountain climber",
            SARAH_AVATAR, 890, 445, "2023-03-15T00:00:00Z",
        );
        let mike = profile(
            "3", "codemaster", "Mike Chen",
            "Full-stack developer | Tech enthusiast | Coffee addict",
            MIKE_AVATAR, 2340, 567, "2023-01-10T00:00:00Z",
        );

        vec![
            post(
                "1", &alex,
                "Just finished an amazing workout session! 💪 Feeling stronger every day. What's your favorite way to stay active?",
                Some(WORKOUT_IMAGE), 24, 5, "2024-01-15T10:30:00Z",
            ),
            post(
                "2", &sarah,
                "Beautiful sunset from my hike today 🌅 Nature never fails to amaze me. There's something magical about watching the day transition into night from a mountain peak.",
                Some(SUNSET_IMAGE), 89, 12, "2024-01-15T18:45:00Z",
            ),
            post(
                "3", &mike,
                "Coding late into the night again 👨‍💻 Working on something exciting that I can't wait to share with you all! The debugging phase is always challenging but so rewarding when everything finally clicks.",
                None, 156, 23, "2024-01-15T23:15:00Z",
            ),
        ]
    }

    pub fn trending_posts(&self) -> Vec<Post> {
        let emma = profile(
            "4", "webdev_pro", "Emma Rodriguez",
            "Frontend Developer | React Enthusiast | UI/UX Designer",
            EMMA_AVATAR, 3240, 890, "2022-11-20T00:00:00Z",
        );
        let david = profile(
            "5", "art_explorer", "David Kim",
            "Street art photographer | Urban culture enthusiast",
            ALEX_AVATAR, 1890, 567, "2023-02-14T00:00:00Z",
        );

        vec![
            post(
                "trending-1", &emma,
                "The future of web development is here! 🚀 Just tried out the new React features and I'm blown away. The developer experience keeps getting better.",
                Some("https://images.unsplash.com/photo-1633356122544-f134324a6cee?w=600&h=400&fit=crop"),
                342, 67, "2024-01-15T14:22:00Z",
            ),
            post(
                "trending-2", &david,
                "Incredible street art discovery in downtown! 🎨 The talent of local artists never ceases to amaze me. Art has this unique power to transform spaces and communities.",
                Some("https://images.unsplash.com/photo-1541961017774-22349e4a1262?w=600&h=400&fit=crop"),
                278, 43, "2024-01-15T11:15:00Z",
            ),
        ]
    }

    pub fn suggested_users(&self) -> Vec<Profile> {
        vec![
            profile(
                "6", "chef_mario", "Mario Rossi",
                "Professional chef | Food photographer | Recipe creator",
                MIKE_AVATAR, 4567, 234, "2022-08-10T00:00:00Z",
            ),
            profile(
                "7", "music_maven", "Luna Chen",
                "Music producer | DJ | Sound engineer",
                SARAH_AVATAR, 2890, 445, "2023-04-05T00:00:00Z",
            ),
            profile(
                "8", "travel_nomad", "Jake Wilson",
                "Digital nomad | Travel blogger | Adventure seeker",
                JOHN_AVATAR, 1234, 678, "2023-07-22T00:00:00Z",
            ),
        ]
    }

    pub fn trending_topics(&self) -> Vec<TrendingTopic> {
        [
            ("webdevelopment", 1234),
            ("photography", 987),
            ("fitness", 756),
            ("cooking", 543),
            ("travel", 432),
        ]
        .into_iter()
        .map(|(tag, posts)| TrendingTopic { tag: tag.to_string(), posts })
        .collect()
    }

    pub fn find_profile(&self, username: &str) -> Option<Profile> {
        match username {
            "johndoe" => Some(profile(
                CURRENT_USER_ID, "johndoe", "John Doe",
                "Software developer passionate about creating amazing user experiences. Love hiking, photography, and good coffee ☕",
                JOHN_AVATAR, 567, 223, "2023-08-15T00:00:00Z",
            )),
            "fitguru" => Some(profile(
                "1", "fitguru", "Alex Thompson",
                "Fitness enthusiast and personal trainer. Helping people achieve their health goals 💪 DM for coaching!",
                ALEX_AVATAR, 1250, 320, "2023-06-01T00:00:00Z",
            )),
            "naturelover" => Some(profile(
                "2", "naturelover", "Sarah Johnson",
                "Adventure seeker | Photographer | Mountain climber 🏔️ Capturing the beauty of our natural world",
                SARAH_AVATAR, 890, 445, "2023-03-15T00:00:00Z",
            )),
            _ => None,
        }
    }

    /// Posts authored by `username`; empty for anyone without fixtures.
    pub fn posts_by(&self, username: &str) -> Vec<Post> {
        let Some(author) = self.find_profile(username) else {
            return Vec::new();
        };

        match username {
            "johndoe" => vec![post(
                "user-1", &author,
                "Just deployed my latest React project! 🚀 So excited to share this with the community. Built with TypeScript and Tailwind CSS.",
                Some("https://images.unsplash.com/photo-1461749280684-dccba630e2f6?w=600&h=400&fit=crop"),
                45, 8, "2024-01-14T16:20:00Z",
            )],
            "fitguru" => vec![post(
                "fit-1", &author,
                "Morning workout complete! 💪 Remember, consistency is key. Even 20 minutes a day makes a difference.",
                Some(WORKOUT_IMAGE), 78, 12, "2024-01-14T08:30:00Z",
            )],
            "naturelover" => vec![post(
                "nature-1", &author,
                "Early morning hike to catch the sunrise 🌅 The mountains were calling and I had to answer!",
                Some(SUNSET_IMAGE), 124, 18, "2024-01-14T06:45:00Z",
            )],
            _ => Vec::new(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn profile(
    id: &str,
    username: &str,
    full_name: &str,
    bio: &str,
    avatar_url: &str,
    followers_count: u32,
    following_count: u32,
    created_at: &str,
) -> Profile {
    Profile {
        id: id.to_string(),
        username: username.to_string(),
        full_name: full_name.to_string(),
        bio: bio.to_string(),
        avatar_url: avatar_url.to_string(),
        followers_count,
        following_count,
        created_at: created_at.to_string(),
    }
}

fn post(
    id: &str,
    author: &Profile,
    content: &str,
    image_url: Option<&str>,
    likes_count: u32,
    comments_count: u32,
    created_at: &str,
) -> Post {
    Post {
        id: id.to_string(),
        user_id: author.id.clone(),
        content: content.to_string(),
        image_url: image_url.map(str::to_string),
        likes_count,
        comments_count,
        created_at: created_at.to_string(),
        profile: author.clone(),
    }
}
