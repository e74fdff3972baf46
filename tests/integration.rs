use actix_web::web;
use serde_json::Value;
use social::config::Config;
use social::server;
use social::state::AppState;
use std::net::TcpListener;
use std::time::Duration;

fn spawn_app(config: Config) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let state = web::Data::new(AppState::new(config));
    let server = server::listen(listener, state).expect("Failed to start server");
    let _ = tokio::spawn(server);
    format!("http://127.0.0.1:{}", port)
}

fn instant_config() -> Config {
    Config {
        home_load_delay: Duration::ZERO,
        profile_load_delay: Duration::ZERO,
        ..Config::default()
    }
}

async fn get_json(client: &reqwest::Client, url: &str) -> Value {
    client
        .get(url)
        .send()
        .await
        .expect("Failed to make request")
        .json::<Value>()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_like_toggle_round_trip() {
    let base_url = spawn_app(instant_config());
    let client = reqwest::Client::new();

    // 1. Like post 2 from the home feed
    let like_resp = client
        .post(&format!("{}/home/like/2", base_url))
        .send()
        .await
        .expect("Failed to like post");

    // The 303 is followed back to the feed
    assert_eq!(like_resp.status(), 200);
    let html = like_resp.text().await.unwrap();
    assert!(html.contains(r#"<span class="likes-count">90</span>"#));
    assert!(html.contains(r#"data-liked="true""#));

    // 2. Unlike it again
    client
        .post(&format!("{}/home/like/2", base_url))
        .send()
        .await
        .expect("Failed to unlike post");

    let feed = get_json(&client, &format!("{}/api/feed", base_url)).await;
    assert_eq!(feed["posts"][1]["id"], "2");
    assert_eq!(feed["posts"][1]["likes_count"], 89);
    assert_eq!(feed["liked_post_ids"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_composer_flow() {
    let base_url = spawn_app(instant_config());
    let client = reqwest::Client::new();

    // Blank text adds nothing
    let blank = client
        .post(&format!("{}/posts", base_url))
        .form(&[("content", "   "), ("image_url", "")])
        .send()
        .await
        .expect("Failed to submit blank post");
    assert_eq!(blank.status(), 200);
    let html = blank.text().await.unwrap();
    assert!(html.contains("data-composer-submit disabled"));

    let feed = get_json(&client, &format!("{}/api/feed", base_url)).await;
    assert_eq!(feed["posts"].as_array().unwrap().len(), 3);

    // Non-blank text is prepended once, with its image reference
    let created = client
        .post(&format!("{}/posts", base_url))
        .form(&[
            ("content", "Test post from integration test!"),
            ("image_url", "https://images.test/photo.jpg"),
        ])
        .send()
        .await
        .expect("Failed to create post");
    assert_eq!(created.status(), 200);

    let feed = get_json(&client, &format!("{}/api/feed", base_url)).await;
    let posts = feed["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 4);
    assert_eq!(posts[0]["content"], "Test post from integration test!");
    assert_eq!(posts[0]["image_url"], "https://images.test/photo.jpg");
    assert_eq!(posts[0]["profile"]["username"], "johndoe");
    assert_eq!(posts[0]["likes_count"], 0);
}

#[tokio::test]
async fn test_profile_pages() {
    let base_url = spawn_app(instant_config());
    let client = reqwest::Client::new();

    let known = client
        .get(&format!("{}/profile/naturelover", base_url))
        .send()
        .await
        .expect("Failed to make request");
    assert_eq!(known.status(), 200);
    let html = known.text().await.unwrap();
    assert!(html.contains("Adventure seeker | Photographer | Mountain climber"));
    assert!(html.contains("profile-card"));
    assert!(html.contains(r#"data-post-id="nature-1""#));

    let unknown = client
        .get(&format!("{}/profile/nobody_here", base_url))
        .send()
        .await
        .expect("Failed to make request");
    assert_eq!(unknown.status(), 404);
    let html = unknown.text().await.unwrap();
    assert!(html.contains("User not found"));
    assert!(!html.contains("profile-card"));
}

#[tokio::test]
async fn test_profile_follow_is_symmetric() {
    let base_url = spawn_app(instant_config());
    let client = reqwest::Client::new();
    let api = format!("{}/api/profiles/fitguru", base_url);

    let before = get_json(&client, &api).await;
    let count = before["profile"]["followers_count"].as_u64().unwrap();
    let following = before["is_following"].as_bool().unwrap();

    client
        .post(&format!("{}/profile/fitguru/follow", base_url))
        .send()
        .await
        .expect("Failed to follow");
    let after = get_json(&client, &api).await;
    assert_eq!(after["is_following"], !following);
    let expected = if following { count - 1 } else { count + 1 };
    assert_eq!(after["profile"]["followers_count"], expected);

    client
        .post(&format!("{}/profile/fitguru/follow", base_url))
        .send()
        .await
        .expect("Failed to unfollow");
    let restored = get_json(&client, &api).await;
    assert_eq!(restored["is_following"], following);
    assert_eq!(restored["profile"]["followers_count"], count);
}

#[tokio::test]
async fn test_media_tab_filters_to_images() {
    let base_url = spawn_app(instant_config());
    let client = reqwest::Client::new();

    let resp = client
        .get(&format!("{}/profile/johndoe?tab=media", base_url))
        .send()
        .await
        .expect("Failed to make request");
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("media-grid"));
    assert!(html.contains("Edit Profile"));

    let snapshot = get_json(&client, &format!("{}/api/profiles/johndoe", base_url)).await;
    assert_eq!(snapshot["tab"], "media");
    for post in snapshot["posts"].as_array().unwrap() {
        assert!(post["image_url"].is_string());
    }
}

#[tokio::test]
async fn test_explore_follow_and_search() {
    let base_url = spawn_app(instant_config());
    let client = reqwest::Client::new();

    let resp = client
        .post(&format!("{}/explore/follow/8", base_url))
        .send()
        .await
        .expect("Failed to follow");
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains(">Following</button>"));

    let resp = client
        .get(&format!("{}/explore?q=react", base_url))
        .send()
        .await
        .expect("Failed to search");
    assert_eq!(resp.status(), 200);

    let snapshot = get_json(&client, &format!("{}/api/explore", base_url)).await;
    assert_eq!(snapshot["query"], "react");
    assert_eq!(snapshot["posts"].as_array().unwrap().len(), 1);
    assert_eq!(snapshot["followed_user_ids"], serde_json::json!(["8"]));
}

#[tokio::test]
async fn test_home_shows_loading_until_delay() {
    let base_url = spawn_app(Config {
        home_load_delay: Duration::from_secs(3600),
        ..instant_config()
    });
    let client = reqwest::Client::new();

    let resp = client
        .get(&format!("{}/", base_url))
        .send()
        .await
        .expect("Failed to make request");
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("spinner"));
    assert!(html.contains(r#"http-equiv="refresh""#));

    let feed = get_json(&client, &format!("{}/api/feed", base_url)).await;
    assert_eq!(feed["loading"], true);
    assert_eq!(feed["posts"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_unknown_like_target_is_not_found() {
    let base_url = spawn_app(instant_config());
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/explore/like/does-not-exist", base_url))
        .send()
        .await
        .expect("Failed to make request");

    assert_eq!(response.status(), 404);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["error"], "Post not found");
}
