// tests/api_tests.rs

use little_learners::{
    config::Config,
    db::{self, lessons, quizzes},
    models::{
        lesson::{CategoryRequest, CreateLessonRequest},
        quiz::{
            AudioOption, AudioQuestion, CreateQuizRequest, MatchingItem, QuizContent, VisualOption,
            VisualQuestion,
        },
    },
    routes,
    state::AppState,
};
use reqwest::{StatusCode, header, redirect::Policy};
use serde_json::{Value, json};
use sqlx::SqlitePool;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "crayons-and-glue";

struct TestApp {
    address: String,
    pool: SqlitePool,
    client: reqwest::Client,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    async fn admin_token(&self) -> String {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

/// Spawns the app on a random port over a fresh in-memory database.
async fn spawn_app() -> TestApp {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory SQLite");
    db::migrate(&pool).await.expect("Failed to migrate database");
    db::users::seed_admin(&pool, ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .expect("Failed to seed admin");

    let media_root = std::env::temp_dir().join(format!("little-learners-{}", uuid::Uuid::new_v4()));

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        admin_username: None,
        admin_password: None,
        bind_addr: "127.0.0.1:0".to_string(),
        media_root: media_root.to_string_lossy().into_owned(),
        media_url: "/media/".to_string(),
        static_root: "static".to_string(),
        allowed_origins: vec!["http://localhost:3000".to_string()],
        max_upload_bytes: 1024 * 1024,
    };

    let state = AppState { pool: pool.clone(), config };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap();

    TestApp { address, pool, client }
}

async fn seed_lesson(pool: &SqlitePool, title: &str, title_de: Option<&str>, age_group: &str) -> i64 {
    let category_id = match lessons::list_categories(pool).await.unwrap().first() {
        Some(category) => category.id,
        None => lessons::create_category(pool, &CategoryRequest { name: "Words".to_string(), order: 0 })
            .await
            .unwrap(),
    };

    lessons::create_lesson(
        pool,
        &CreateLessonRequest {
            category_id,
            title: title.to_string(),
            title_sr: None,
            title_de: title_de.map(String::from),
            description: "A short lesson".to_string(),
            description_sr: None,
            description_de: None,
            video_url: None,
            video_file: None,
            image: None,
            order: 0,
            age_group: Some(age_group.to_string()),
        },
    )
    .await
    .unwrap()
}

async fn seed_quiz(pool: &SqlitePool, title: &str, content: QuizContent) -> i64 {
    quizzes::create_quiz(
        pool,
        CreateQuizRequest {
            title: title.to_string(),
            difficulty: "easy".to_string(),
            cover_image: Some("quiz_covers/cover.png".to_string()),
            lesson_id: None,
            age_group: None,
            content,
        },
    )
    .await
    .unwrap()
}

fn visual_content() -> QuizContent {
    QuizContent::Visual(vec![VisualQuestion {
        id: 0,
        question_text: Some("Which one is the dog?".to_string()),
        question_image: None,
        options: vec![
            VisualOption { id: 0, image: Some("visual_quiz_options/dog.png".to_string()), is_correct: true },
            VisualOption { id: 0, image: Some("visual_quiz_options/cat.png".to_string()), is_correct: false },
        ],
    }])
}

#[tokio::test]
async fn unknown_path_is_404() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/random_path_that_does_not_exist"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lesson_api_finds_text_only_present_in_german_title() {
    let app = spawn_app().await;
    seed_lesson(&app.pool, "Colors", Some("Farben"), "4-5").await;
    seed_lesson(&app.pool, "Animals", None, "4-5").await;

    let response = app
        .client
        .get(app.url("/api/lessons/?q=farben"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["title"], "Colors");
    assert_eq!(found[0]["has_blocks"], false);
}

#[tokio::test]
async fn lesson_api_filters_by_age_group() {
    let app = spawn_app().await;
    seed_lesson(&app.pool, "Numbers", None, "4-5").await;
    seed_lesson(&app.pool, "Reading", None, "6-7").await;

    let body: Value = app
        .client
        .get(app.url("/api/lessons/?age_group=6-7"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let titles: Vec<&str> = body.as_array().unwrap().iter().map(|l| l["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Reading"]);
}

#[tokio::test]
async fn search_page_shows_english_title_for_german_match() {
    let app = spawn_app().await;
    seed_lesson(&app.pool, "Colors", Some("Farben"), "4-5").await;

    let response = app
        .client
        .get(app.url("/lessons/search/?q=Farben"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = response.text().await.unwrap();
    assert!(html.contains("Colors"));
    assert!(html.contains("Lessons (1)"));
}

#[tokio::test]
async fn empty_search_returns_nothing() {
    let app = spawn_app().await;
    seed_lesson(&app.pool, "Colors", None, "4-5").await;

    let html = app
        .client
        .get(app.url("/lessons/search/?q="))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("Type something to search for."));
    assert!(!html.contains("Colors"));
}

#[tokio::test]
async fn visual_endpoint_returns_only_visual_questions() {
    let app = spawn_app().await;
    let visual_id = seed_quiz(&app.pool, "Pets", visual_content()).await;
    let blank_id = seed_quiz(&app.pool, "Fill me", QuizContent::FillBlank).await;

    let response = app
        .client
        .get(app.url(&format!("/api/quizzes/visual-quiz/{}/", visual_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["quiz_type"], "visual");
    assert_eq!(body["questions"].as_array().unwrap().len(), 1);
    assert_eq!(body["questions"][0]["options"].as_array().unwrap().len(), 2);
    assert!(
        body["questions"][0]["options"][0]["image_url"]
            .as_str()
            .unwrap()
            .ends_with("/media/visual_quiz_options/dog.png")
    );
    assert!(body.get("visual_questions").is_none());

    let response = app
        .client
        .get(app.url(&format!("/api/quizzes/visual-quiz/{}/", blank_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn quiz_detail_masks_spelling_words() {
    let app = spawn_app().await;
    let id = seed_quiz(
        &app.pool,
        "Spelling",
        QuizContent::Matching(vec![MatchingItem {
            id: 0,
            image: "matching_game/cat.png".to_string(),
            full_word: Some("cat".to_string()),
            missing_index: Some(1),
            distractor1: Some("o".to_string()),
            distractor2: Some("e".to_string()),
        }]),
    )
    .await;

    let body: Value = app
        .client
        .get(app.url(&format!("/api/quizzes/{}/", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["matching_items"][0]["masked_word"], "c_t");
    assert_eq!(body["matching_items"][0]["correct_letter"], "a");
    assert!(body.get("questions").is_none());
    assert!(body["cover_image"].as_str().unwrap().starts_with("http://127.0.0.1:"));
}

#[tokio::test]
async fn subscribing_twice_keeps_one_row() {
    let app = spawn_app().await;

    let first = app
        .client
        .post(app.url("/subscribe/"))
        .header(header::REFERER, format!("{}/blog/", app.address))
        .form(&[("email", "parent@example.com")])
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(first.headers()[header::LOCATION], "/blog/");

    let second = app
        .client
        .post(app.url("/subscribe/"))
        .form(&[("email", "parent@example.com")])
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::SEE_OTHER);
    assert_eq!(second.headers()[header::LOCATION], "/");

    let flash = second
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("flash=already_subscribed"));
    assert!(flash);
    assert_eq!(app.count("subscribers").await, 1);
}

#[tokio::test]
async fn api_subscribe_rejects_duplicates() {
    let app = spawn_app().await;
    let payload = json!({ "email": "mentor@example.com" });

    let created = app.client.post(app.url("/api/subscribe/")).json(&payload).send().await.unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let duplicate = app.client.post(app.url("/api/subscribe/")).json(&payload).send().await.unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let invalid = app
        .client
        .post(app.url("/api/subscribe/"))
        .json(&json!({ "email": "not-an-email" }))
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn posts_with_same_title_get_distinct_slugs() {
    let app = spawn_app().await;
    let token = app.admin_token().await;
    let post = json!({ "title_en": "Hello World", "content_en": "<p>Hi!</p><script>alert(1)</script>" });

    let mut slugs = Vec::new();
    for _ in 0..2 {
        let response = app
            .client
            .post(app.url("/api/admin/posts"))
            .bearer_auth(&token)
            .json(&post)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = response.json().await.unwrap();
        slugs.push(body["slug"].as_str().unwrap().to_string());
    }
    assert_eq!(slugs, vec!["hello-world", "hello-world-2"]);

    let html = app
        .client
        .get(app.url("/blog/hello-world-2/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("<p>Hi!</p>"));
    assert!(!html.contains("alert(1)"));
}

#[tokio::test]
async fn draft_posts_are_not_public() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    app.client
        .post(app.url("/api/admin/posts"))
        .bearer_auth(&token)
        .json(&json!({ "title_en": "Secret", "content_en": "Soon", "is_published": false }))
        .send()
        .await
        .unwrap();

    let response = app.client.get(app.url("/blog/secret/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn attempts_are_recorded() {
    let app = spawn_app().await;
    let quiz_id = seed_quiz(&app.pool, "Pets", visual_content()).await;

    let response = app
        .client
        .post(app.url("/api/quizzes/submit/"))
        .json(&json!({ "quiz": quiz_id, "score": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["quiz"], quiz_id);
    assert_eq!(body["user"], Value::Null);

    let missing = app
        .client
        .post(app.url("/api/quizzes/submit/"))
        .json(&json!({ "quiz": 9999, "score": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.count("quiz_attempts").await, 1);
}

#[tokio::test]
async fn contact_form_requires_every_field() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/contact/?lang=de"))
        .form(&[("name", "Ana"), ("email", ""), ("message", "Hallo")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("Bitte fülle alle Felder aus."));
    assert_eq!(app.count("contact_messages").await, 0);

    let response = app
        .client
        .post(app.url("/contact/?lang=de"))
        .form(&[("name", "Ana"), ("email", "ana@example.com"), ("message", "Hallo")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/contact/?lang=de");
    assert_eq!(app.count("contact_messages").await, 1);
}

#[tokio::test]
async fn language_is_remembered_in_a_cookie() {
    let app = spawn_app().await;

    let response = app.client.get(app.url("/about/?lang=sr")).send().await.unwrap();
    let remembered = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("lang=sr"));
    assert!(remembered);
    assert!(response.text().await.unwrap().contains("O nama"));

    let html = app
        .client
        .get(app.url("/about/"))
        .header(header::COOKIE, "lang=sr")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("O nama"));

    let html = app
        .client
        .get(app.url("/about/?lang=fr"))
        .header(header::COOKIE, "lang=sr")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("About us"));
}

#[tokio::test]
async fn replacing_content_switches_quiz_type() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let response = app
        .client
        .post(app.url("/api/admin/quizzes"))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Counting",
            "difficulty": "easy",
            "content": {
                "quiz_type": "multiple_choice",
                "items": [{ "text": "2 + 2?", "options": [
                    { "text": "4", "is_correct": true },
                    { "text": "5" }
                ]}]
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = response.json::<Value>().await.unwrap()["id"].as_i64().unwrap();

    let response = app
        .client
        .put(app.url(&format!("/api/admin/quizzes/{}/content", id)))
        .bearer_auth(&token)
        .json(&json!({
            "quiz_type": "visual",
            "items": [{ "question_text": "Find the sun", "options": [{ "is_correct": true }] }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = app
        .client
        .get(app.url(&format!("/api/quizzes/{}/", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["quiz_type"], "visual");
    assert!(body.get("questions").is_none());
    assert_eq!(body["visual_questions"][0]["question_text"], "Find the sun");

    let form: Value = app
        .client
        .get(app.url(&format!("/api/admin/quizzes/{}/form", id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let inlines = form["inlines"].as_array().unwrap();
    assert_eq!(inlines.len(), 1);
    assert_eq!(inlines[0]["name"], "visual_questions");
}

#[tokio::test]
async fn admin_api_requires_a_token() {
    let app = spawn_app().await;

    let response = app.client.get(app.url("/api/admin/messages")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .client
        .get(app.url("/api/admin/messages"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&json!({ "username": ADMIN_USERNAME, "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn media_upload_lands_in_kind_directory() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let part = reqwest::multipart::Part::bytes(b"fake png".to_vec()).file_name("Dog.PNG");
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = app
        .client
        .post(app.url("/api/admin/media/visual_option_image"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    let path = body["path"].as_str().unwrap();
    assert!(path.starts_with("visual_quiz_options/"));
    assert!(path.ends_with(".png"));
    assert!(body["url"].as_str().unwrap().ends_with(&format!("/media/{}", path)));
}

fn audio_content() -> QuizContent {
    QuizContent::Audio(vec![AudioQuestion {
        id: 0,
        image: "audio_quiz_images/cow.png".to_string(),
        correct_answer: "cow".to_string(),
        options: vec![
            AudioOption {
                id: 0,
                text: "cow".to_string(),
                audio_file: "audio_quiz_options/cow.mp3".to_string(),
                is_correct: true,
            },
            AudioOption {
                id: 0,
                text: "cat".to_string(),
                audio_file: "https://cdn.example/cat.mp3".to_string(),
                is_correct: false,
            },
        ],
    }])
}

#[tokio::test]
async fn audio_endpoint_serves_only_audio_quizzes() {
    let app = spawn_app().await;
    let audio_id = seed_quiz(&app.pool, "Farm sounds", audio_content()).await;
    let visual_id = seed_quiz(&app.pool, "Pets", visual_content()).await;

    let response = app
        .client
        .get(app.url(&format!("/api/quizzes/audio-quiz/{}/", audio_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["quiz_type"], "audio");
    let options = body["audio_questions"][0]["options"].as_array().unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(
        options[0]["audio_file"].as_str().unwrap(),
        format!("{}/media/audio_quiz_options/cow.mp3", app.address)
    );
    assert_eq!(options[1]["audio_file"], "https://cdn.example/cat.mp3");
    assert!(
        body["audio_questions"][0]["image"]
            .as_str()
            .unwrap()
            .starts_with("http://127.0.0.1:")
    );
    assert!(body.get("visual_questions").is_none());

    let response = app
        .client
        .get(app.url(&format!("/api/quizzes/audio-quiz/{}/", visual_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn editing_a_post_title_keeps_its_slug() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let created: Value = app
        .client
        .post(app.url("/api/admin/posts"))
        .bearer_auth(&token)
        .json(&json!({ "title_en": "Spring Crafts", "content_en": "Glue and paper" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["slug"], "spring-crafts");

    let response = app
        .client
        .put(app.url(&format!("/api/admin/posts/{}", id)))
        .bearer_auth(&token)
        .json(&json!({ "title_en": "Autumn Crafts" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let post: Value = app
        .client
        .get(app.url(&format!("/api/admin/posts/{}", id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(post["title_en"], "Autumn Crafts");
    assert_eq!(post["slug"], "spring-crafts");

    let response = app.client.get(app.url("/blog/spring-crafts/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Autumn Crafts"));
}

#[tokio::test]
async fn explicit_slug_must_fit_in_a_url() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let response = app
        .client
        .post(app.url("/api/admin/posts"))
        .bearer_auth(&token)
        .json(&json!({ "title_en": "Hello", "content_en": "Hi", "slug": "Hello World/part 2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.count("blog_posts").await, 0);

    let response = app
        .client
        .post(app.url("/api/admin/posts"))
        .bearer_auth(&token)
        .json(&json!({ "title_en": "Hello", "content_en": "Hi", "slug": "hello_part-2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.client.get(app.url("/blog/hello_part-2/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_lists_can_be_filtered() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    seed_quiz(&app.pool, "Pets", visual_content()).await;
    seed_quiz(&app.pool, "Farm sounds", audio_content()).await;
    seed_lesson(&app.pool, "Colors", Some("Farben"), "4-5").await;
    seed_lesson(&app.pool, "Reading", None, "6-7").await;

    for (name, email, message) in [
        ("Ana", "ana@example.com", "Loved the colors lesson"),
        ("Marko", "marko@example.com", "More songs please"),
    ] {
        app.client
            .post(app.url("/contact/"))
            .form(&[("name", name), ("email", email), ("message", message)])
            .send()
            .await
            .unwrap();
    }
    for email in ["ana@example.com", "dad@school.example"] {
        app.client
            .post(app.url("/api/subscribe/"))
            .json(&json!({ "email": email }))
            .send()
            .await
            .unwrap();
    }
    for (title, published) in [("Live", true), ("Draft", false)] {
        app.client
            .post(app.url("/api/admin/posts"))
            .bearer_auth(&token)
            .json(&json!({ "title_en": title, "content_en": "Body", "is_published": published }))
            .send()
            .await
            .unwrap();
    }

    let get = |path: &'static str| {
        let request = app.client.get(app.url(path)).bearer_auth(&token);
        async move { request.send().await.unwrap().json::<Value>().await.unwrap() }
    };
    let titles = |body: &Value, key: &str| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|row| row[key].as_str().unwrap().to_string())
            .collect()
    };

    let body = get("/api/admin/quizzes?quiz_type=audio").await;
    assert_eq!(titles(&body, "title"), vec!["Farm sounds"]);
    let body = get("/api/admin/quizzes?difficulty=hard").await;
    assert!(body.as_array().unwrap().is_empty());

    let body = get("/api/admin/lessons?q=farben").await;
    assert_eq!(titles(&body, "title"), vec!["Colors"]);
    let body = get("/api/admin/lessons?age_group=6-7").await;
    assert_eq!(titles(&body, "title"), vec!["Reading"]);

    let body = get("/api/admin/messages?q=songs").await;
    assert_eq!(titles(&body, "name"), vec!["Marko"]);
    let body = get("/api/admin/messages?is_read=true").await;
    assert!(body.as_array().unwrap().is_empty());

    let body = get("/api/admin/subscribers?q=school").await;
    assert_eq!(titles(&body, "email"), vec!["dad@school.example"]);

    let body = get("/api/admin/posts?is_published=false").await;
    assert_eq!(titles(&body, "title_en"), vec!["Draft"]);

    let body = get("/api/admin/forms").await;
    assert!(body["models"].as_array().unwrap().iter().any(|m| m == "quiz"));
}
