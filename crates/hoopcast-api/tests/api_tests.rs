//! Router-level tests with in-process collaborators.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use hoopcast_api::{create_router, ApiConfig, AppState};
use hoopcast_clients::{
    ClientError, ClientResult, Collaborator, CompletionRequest, SpeechSynthesizer, TextGenerator, VideoAnalysis,
    VideoAnalyzer, Voice,
};

const LONG_COMMENTARY: &str = "What a dunk! He rises up over two defenders. The crowd is on its feet! \
                               This building is shaking right now.";

struct FakeAnalyzer {
    fail: bool,
}

#[async_trait]
impl VideoAnalyzer for FakeAnalyzer {
    async fn analyze(&self, video_id: &str) -> ClientResult<VideoAnalysis> {
        if self.fail {
            return Err(ClientError::Api {
                collaborator: Collaborator::VideoAnalysis,
                status: 404,
                body: "video not found".to_string(),
            });
        }
        Ok(VideoAnalysis {
            text: format!("Highlights from {}: a thunderous dunk in transition.", video_id),
            video_id: video_id.to_string(),
        })
    }
}

#[derive(Default)]
struct FakeGenerator {
    requests: Mutex<Vec<CompletionRequest>>,
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn complete(&self, request: &CompletionRequest) -> ClientResult<Option<String>> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(Some(LONG_COMMENTARY.to_string()))
    }
}

#[derive(Default)]
struct FakeSynthesizer {
    fail: bool,
    calls: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    async fn synthesize(&self, text: &str, voice_id: &str) -> ClientResult<Vec<u8>> {
        self.calls.lock().unwrap().push((text.to_string(), voice_id.to_string()));
        if self.fail {
            return Err(ClientError::Api {
                collaborator: Collaborator::SpeechSynthesis,
                status: 401,
                body: "quota exceeded".to_string(),
            });
        }
        Ok(b"ID3fake-mp3".to_vec())
    }

    async fn list_voices(&self) -> ClientResult<Vec<Voice>> {
        Ok(vec![Voice {
            voice_id: "YiUJCEfHcazOOIxtzmUX".to_string(),
            name: "Harlan".to_string(),
            category: None,
            description: None,
            preview_url: None,
        }])
    }
}

struct TestApp {
    router: axum::Router,
    generator: Arc<FakeGenerator>,
    synthesizer: Arc<FakeSynthesizer>,
}

fn test_app_with(config: ApiConfig, analysis_fails: bool, speech_fails: bool) -> TestApp {
    let generator = Arc::new(FakeGenerator::default());
    let synthesizer = Arc::new(FakeSynthesizer {
        fail: speech_fails,
        ..FakeSynthesizer::default()
    });
    let state = AppState::with_clients(
        config,
        Arc::new(FakeAnalyzer { fail: analysis_fails }),
        generator.clone(),
        synthesizer.clone(),
    );
    TestApp {
        router: create_router(state, None),
        generator,
        synthesizer,
    }
}

fn test_app() -> TestApp {
    test_app_with(ApiConfig::default(), false, false)
}

async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    app.router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(app: &TestApp, uri: &str, body: Value) -> Response<Body> {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_health_endpoint_sets_security_headers() {
    let app = test_app();
    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["X-Content-Type-Options"], "nosniff");
    assert!(headers.contains_key("X-Frame-Options"));
    assert!(headers.contains_key("X-Request-ID"));

    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = test_app();
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .header("X-Request-ID", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["X-Request-ID"], "req-42");
}

#[tokio::test]
async fn test_ready_lists_collaborators() {
    let app = test_app();
    let json = body_json(get(&app, "/ready").await).await;
    assert_eq!(json["status"], "ready");
    assert_eq!(json["collaborators"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = test_app();
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/get-commentary-audio")
                .header("Origin", "http://localhost:3000")
                .header("Access-Control-Request-Method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status() == StatusCode::OK || response.status() == StatusCode::NO_CONTENT);
    assert!(response.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_commentary_styles() {
    let app = test_app();
    let json = body_json(get(&app, "/api/commentary-styles").await).await;

    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 4);
    assert_eq!(json["defaultStyle"], "espn-steroid");
    assert_eq!(json["styles"][0]["id"], "kevin-harlan");
    assert_eq!(json["styles"][0]["voiceId"], "YiUJCEfHcazOOIxtzmUX");
}

#[tokio::test]
async fn test_voices() {
    let app = test_app();
    let json = body_json(get(&app, "/api/voices").await).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["voices"][0]["voice_id"], "YiUJCEfHcazOOIxtzmUX");
}

#[tokio::test]
async fn test_commentary_requires_video_id() {
    let app = test_app();
    let response = get(&app, "/api/basketball-commentary").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Video ID is required");
}

#[tokio::test]
async fn test_commentary_rejects_bad_durations() {
    let app = test_app();
    for duration in ["abc", "0", "-5", ""] {
        let response = get(&app, &format!("/api/basketball-commentary?videoId=v1&duration={}", duration)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "duration {duration:?}");
        assert_eq!(body_json(response).await["message"], "Invalid duration");
    }
    assert!(app.generator.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_commentary_for_video_is_trimmed_to_duration() {
    let app = test_app();
    let response = get(&app, "/api/basketball-commentary?videoId=v1&duration=4").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["videoId"], "v1");
    assert_eq!(json["duration"], 4.0);
    assert_eq!(json["wordBudget"], 10);
    assert_eq!(json["commentary"], "What a dunk! He rises up over two defenders.");
    assert!(json["originalDescription"].as_str().unwrap().contains("thunderous dunk"));

    let requests = app.generator.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].max_output_tokens, 150);
}

#[tokio::test]
async fn test_commentary_from_description_with_null_duration() {
    let app = test_app();
    let response = post_json(
        &app,
        "/api/basketball-commentary",
        json!({ "description": "A steal and a breakaway layup.", "duration": null }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["wordBudget"], 40);
    assert_eq!(json["commentary"], LONG_COMMENTARY);
    assert!(json.get("videoId").is_none());
    assert!(json.get("duration").is_none());
}

#[tokio::test]
async fn test_commentary_from_description_requires_description() {
    let app = test_app();
    let response = post_json(&app, "/api/basketball-commentary", json!({ "description": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Description is required");
}

#[tokio::test]
async fn test_commentary_from_description_checks_description_first() {
    let app = test_app();
    let response = post_json(
        &app,
        "/api/basketball-commentary",
        json!({ "description": "  ", "duration": "abc" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Description is required");
    assert!(app.generator.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_audio_from_text_uses_default_voice() {
    let app = test_app();
    let response = post_json(&app, "/api/basketball-audio", json!({ "text": "Bang!" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"basketball-commentary-espn-steroid.mp3\""
    );
    assert_eq!(body_bytes(response).await, b"ID3fake-mp3".to_vec());

    let calls = app.synthesizer.calls.lock().unwrap();
    assert_eq!(calls[0], ("Bang!".to_string(), "6XVUA6jZZtcqPTW6amVC".to_string()));
    assert!(app.generator.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_audio_legacy_voice_overrides_style() {
    let app = test_app();
    let response = post_json(
        &app,
        "/api/basketball-audio",
        json!({ "text": "Bang!", "voiceId": "my-voice", "commentaryStyle": "mike-breen" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"basketball-commentary-custom.mp3\""
    );
    assert_eq!(app.synthesizer.calls.lock().unwrap()[0].1, "my-voice");
}

#[tokio::test]
async fn test_audio_from_description_generates_first() {
    let app = test_app();
    let response = post_json(
        &app,
        "/api/basketball-audio",
        json!({ "description": "A dunk.", "duration": "4", "commentaryStyle": "british-analyst" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let calls = app.synthesizer.calls.lock().unwrap();
    assert_eq!(calls[0].0, "What a dunk! He rises up over two defenders.");
    assert_eq!(calls[0].1, "8t6x0k43h2faV0HDWfnn");
}

#[tokio::test]
async fn test_audio_requires_text_or_description() {
    let app = test_app();
    let response = post_json(&app, "/api/basketball-audio", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Text or description is required");
}

#[tokio::test]
async fn test_audio_for_video_names_file_after_style_and_video() {
    let app = test_app();
    let response = get(&app, "/api/basketball-audio?videoId=abc123&commentaryStyle=unknown-style").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"basketball-commentary-espn-steroid-abc123.mp3\""
    );
}

#[tokio::test]
async fn test_pipeline_requires_duration() {
    let app = test_app();
    let response = get(&app, "/api/get-commentary-audio?videoId=v1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Duration is required");
}

#[tokio::test]
async fn test_pipeline_treats_empty_duration_as_missing() {
    let app = test_app();
    for uri in [
        "/api/get-commentary-audio?videoId=v1&duration=",
        "/api/get-commentary-audio?videoId=v1&duration=%20",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Duration is required");
    }

    let response = get(&app, "/api/get-commentary-audio?videoId=v1&duration=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid duration");
}

#[tokio::test]
async fn test_pipeline_returns_audio_with_headers() {
    let app = test_app();
    let response = get(
        &app,
        "/api/get-commentary-audio?videoId=v1&duration=4&commentaryStyle=kevin-harlan",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::CONTENT_TYPE], "audio/mpeg");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"commentary-kevin-harlan-v1-4s.mp3\""
    );
    assert_eq!(headers["x-video-id"], "v1");
    assert_eq!(headers["x-duration"], "4");
    assert_eq!(headers["x-commentary-style"], "kevin-harlan");
    assert_eq!(headers["x-voice-id"], "YiUJCEfHcazOOIxtzmUX");
    assert_eq!(headers["x-commentary-length"], "44");

    let encoded = headers["x-commentary"].to_str().unwrap();
    assert_eq!(
        urlencoding::decode(encoded).unwrap(),
        "What a dunk! He rises up over two defenders."
    );
}

#[tokio::test]
async fn test_pipeline_degrades_to_text_when_speech_fails() {
    let app = test_app_with(ApiConfig::default(), false, true);
    let response = get(&app, "/api/get-commentary-audio?videoId=v1&duration=4").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["commentary"], "What a dunk! He rises up over two defenders.");
    assert_eq!(json["commentaryStyle"], "espn-steroid");
    assert_eq!(json["audioGenerationError"], "ElevenLabs API error: 401 - quota exceeded");
}

#[tokio::test]
async fn test_pipeline_reports_failed_step() {
    let app = test_app_with(ApiConfig::default(), true, false);
    let response = get(&app, "/api/get-commentary-audio?videoId=gone&duration=10").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Commentary audio pipeline failed");
    assert_eq!(json["failedStep"], "video-analysis");
    assert_eq!(json["videoId"], "gone");
    assert!(app.generator.requests.lock().unwrap().is_empty());
    assert!(app.synthesizer.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_video_analysis_uses_sample_video() {
    let config = ApiConfig {
        sample_video_id: "sample-1".to_string(),
        ..ApiConfig::default()
    };
    let app = test_app_with(config, false, false);
    let json = body_json(get(&app, "/api/test-video-analysis").await).await;

    assert_eq!(json["videoId"], "sample-1");
    assert!(json["analysis"].as_str().unwrap().starts_with("Highlights from sample-1"));
}

#[tokio::test]
async fn test_rate_limit_by_forwarded_ip() {
    let config = ApiConfig {
        rate_limit_rps: 1,
        rate_limit_burst: 1,
        ..ApiConfig::default()
    };
    let app = test_app_with(config, false, false);

    let request = || {
        Request::builder()
            .uri("/api/commentary-styles")
            .header("X-Forwarded-For", "203.0.113.9")
            .body(Body::empty())
            .unwrap()
    };

    let first = app.router.clone().oneshot(request()).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.router.clone().oneshot(request()).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(second.headers()["Retry-After"], "1");
}
