use pretty_assertions::assert_eq;
use scout_core::{ActionType, ErrorKind, JobStatus, LoginRequest};
use scout_engine::{ApiClient, ApiError, ApiSettings};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&ApiSettings::with_base_url(server.uri())).expect("client")
}

fn preview_body(video_id: &str, status: &str, action: &str) -> serde_json::Value {
    json!({
        "video_id": video_id,
        "title": "Crispy Pork Belly",
        "thumbnail_url": "https://i.ytimg.com/vi/abc/hq.jpg",
        "duration": 754,
        "published_at": "2024-03-01T10:00:00Z",
        "recipe_slug": null,
        "recipe_generation_status": status,
        "channel": { "id": "UC1", "name": "Kitchen Lab" },
        "action_type": action
    })
}

#[tokio::test]
async fn preview_posts_video_url_and_reads_wrapped_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/videos/preview"))
        .and(header("Accept", "application/json"))
        .and(body_json(json!({ "video_url": "https://youtu.be/abc" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": preview_body("abc", "pending", "generate") })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let preview = client_for(&server)
        .preview_video("https://youtu.be/abc")
        .await
        .expect("preview ok");
    assert_eq!(preview.video_id, "abc");
    assert_eq!(preview.channel.name, "Kitchen Lab");
    assert_eq!(preview.duration, Some(754));
    assert_eq!(preview.action_type, ActionType::Generate);
    assert_eq!(preview.recipe_generation_status, JobStatus::Pending);
}

#[tokio::test]
async fn status_accepts_bare_and_wrapped_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos/bare/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "action_type": "view_recipe",
            "recipe_slug": "crispy-pork-belly"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/videos/wrapped/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "status": "processing" } })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let bare = client.video_status("bare").await.expect("bare status");
    assert_eq!(bare.status, JobStatus::Completed);
    assert_eq!(bare.recipe_slug.as_deref(), Some("crispy-pork-belly"));

    let wrapped = client.video_status("wrapped").await.expect("wrapped status");
    assert_eq!(wrapped.status, JobStatus::Processing);
    assert_eq!(wrapped.recipe_slug, None);
}

#[tokio::test]
async fn validation_errors_carry_field_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/videos"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "The video url field must be a valid URL.",
            "errors": { "video_url": ["The video url field must be a valid URL."] }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_video("nonsense")
        .await
        .expect_err("422");
    assert_eq!(err.status(), Some(422));
    let report = err.report();
    assert_eq!(report.kind, ErrorKind::Validation);
    assert_eq!(report.message, "The video url field must be a valid URL.");
    assert_eq!(
        report.fields["video_url"],
        vec!["The video url field must be a valid URL.".to_string()]
    );
}

#[tokio::test]
async fn unauthenticated_and_server_errors_are_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthenticated." })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user/library"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.current_user().await.expect_err("401");
    assert!(matches!(err, ApiError::Unauthenticated { status: 401, .. }));
    assert_eq!(err.report().kind, ErrorKind::Unauthorized);

    let err = client.library().await.expect_err("503");
    assert!(matches!(err, ApiError::Server { status: 503, message: None }));
    assert_eq!(err.report().kind, ErrorKind::Server);
    assert!(err.report().message.is_empty());
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    drop(server);

    let err = client.recipes(1).await.expect_err("connection refused");
    assert_eq!(err.report().kind, ErrorKind::Network);
}

#[tokio::test]
async fn login_echoes_xsrf_cookie_as_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sanctum/csrf-cookie"))
        .respond_with(
            ResponseTemplate::new(204)
                .append_header("Set-Cookie", "XSRF-TOKEN=abc%3D; path=/; samesite=lax"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("X-XSRF-TOKEN", "abc="))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "name": "Ada", "email": "ada@example.com"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user = client
        .login(&LoginRequest {
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
            remember: false,
        })
        .await
        .expect("login ok");
    assert_eq!(user.name, "Ada");
    assert_eq!(client.xsrf_token().as_deref(), Some("abc="));
}

#[tokio::test]
async fn recipes_request_the_given_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/recipes"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 1,
                "title": "Crispy Pork Belly",
                "slug": "crispy-pork-belly",
                "channel_name": "Kitchen Lab",
                "dish": { "id": 3, "name": "Pork", "slug": "pork" }
            }],
            "meta": { "current_page": 2, "last_page": 4, "per_page": 12, "total": 40 }
        })))
        .mount(&server)
        .await;

    let page = client_for(&server).recipes(2).await.expect("recipes");
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].dish.name, "Pork");
    let meta = page.meta.expect("meta");
    assert_eq!((meta.current_page, meta.last_page), (2, 4));
}

#[tokio::test]
async fn forgot_password_returns_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sanctum/csrf-cookie"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/forgot-password"))
        .and(body_json(json!({ "email": "ada@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "We have emailed your password reset link."
        })))
        .mount(&server)
        .await;

    let message = client_for(&server)
        .forgot_password("ada@example.com")
        .await
        .expect("reset link");
    assert_eq!(
        message.as_deref(),
        Some("We have emailed your password reset link.")
    );
}

#[tokio::test]
async fn delete_library_video_sends_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/user/library/abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete_library_video("abc")
        .await
        .expect("deleted");
}
