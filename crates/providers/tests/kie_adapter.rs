use std::time::Duration;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ocgen_core::provider::ProviderKind;
use ocgen_core::task::{ProviderJobHandle, TaskStatus};
use ocgen_core::types::{AspectRatio, GenerationRequest, Resolution, ShotPrompt};
use ocgen_providers::config::ProviderConfig;
use ocgen_providers::{ProviderError, ProviderLookup, ProviderRegistry};

const CALLBACK: &str = "https://app.example/api/generation/webhook";

fn registry(server: &MockServer) -> ProviderRegistry {
    let config = ProviderConfig::new("test-key", &server.uri()).unwrap();
    ProviderRegistry::from_config(&config).unwrap()
}

fn hailuo_request() -> GenerationRequest {
    let mut req = GenerationRequest::new("hailuo", "a dancer under neon lights");
    req.character_image_url = Some("https://cdn.example/oc.png".into());
    req
}

#[tokio::test]
async fn submit_returns_provider_task_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/createTask"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "hailuo/2-3-image-to-video-standard",
            "callBackUrl": CALLBACK,
            "input": {"duration": "6", "resolution": "1080P"},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "success",
            "data": {"taskId": "task_hailuo_1"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut req = hailuo_request();
    req.resolution = Some(Resolution::P1080);

    let handle = registry(&server)
        .adapter(ProviderKind::HailuoStandard)
        .submit(&req, CALLBACK)
        .await
        .unwrap();
    assert_eq!(handle.provider_task_id(), "task_hailuo_1");
}

#[tokio::test]
async fn business_error_carries_provider_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/createTask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 402,
            "msg": "Insufficient credits",
        })))
        .mount(&server)
        .await;

    let err = registry(&server)
        .adapter(ProviderKind::Sora2)
        .submit(&GenerationRequest::new("sora-2", "p"), CALLBACK)
        .await
        .unwrap_err();
    assert_matches!(
        &err,
        ProviderError::Business { provider: ProviderKind::Sora2, code: 402, message }
            if message == "Insufficient credits"
    );
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn http_error_status_is_business_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/createTask"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream busy"))
        .mount(&server)
        .await;

    let err = registry(&server)
        .adapter(ProviderKind::Veo31Fast)
        .submit(&GenerationRequest::new("veo3_fast", "p"), CALLBACK)
        .await
        .unwrap_err();
    assert_matches!(&err, ProviderError::Business { code: 503, message, .. } if message == "upstream busy");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn missing_task_id_is_contract_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/createTask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "success",
            "data": {},
        })))
        .mount(&server)
        .await;

    let err = registry(&server)
        .adapter(ProviderKind::Wan25)
        .submit(&GenerationRequest::new("wan", "p"), CALLBACK)
        .await
        .unwrap_err();
    assert_matches!(err, ProviderError::Contract { provider: ProviderKind::Wan25, raw, .. } if raw.contains("\"data\""));
}

#[tokio::test]
async fn non_envelope_body_is_contract_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/createTask"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = registry(&server)
        .adapter(ProviderKind::KlingV25)
        .submit(&GenerationRequest::new("kling", "p"), CALLBACK)
        .await
        .unwrap_err();
    assert_matches!(err, ProviderError::Contract { .. });
}

#[tokio::test]
async fn constraint_violation_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut req = hailuo_request();
    req.duration_seconds = Some(10);
    req.resolution = Some(Resolution::P1080);

    let err = registry(&server)
        .adapter(ProviderKind::HailuoPro)
        .submit(&req, CALLBACK)
        .await
        .unwrap_err();
    assert_matches!(err, ProviderError::Constraint(v) if v.field == "resolution");
}

#[tokio::test]
async fn poll_succeeded_returns_urls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/recordInfo"))
        .and(query_param("taskId", "task_42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "success",
            "data": {
                "taskId": "task_42",
                "state": "success",
                "resultJson": "{\"resultUrls\":[\"https://cdn.example/v1.mp4\"]}",
            },
        })))
        .mount(&server)
        .await;

    let outcome = registry(&server)
        .adapter(ProviderKind::KlingV30)
        .poll(&ProviderJobHandle::new("task_42").unwrap())
        .await
        .unwrap();
    assert_eq!(outcome.status, TaskStatus::Succeeded);
    assert_eq!(outcome.result_urls, vec!["https://cdn.example/v1.mp4"]);
}

#[tokio::test]
async fn poll_failed_passes_detail_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/recordInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {
                "taskId": "task_7",
                "state": "fail",
                "failCode": 500,
                "failMsg": "internal render error",
            },
        })))
        .mount(&server)
        .await;

    let outcome = registry(&server)
        .adapter(ProviderKind::Sora2Pro)
        .poll(&ProviderJobHandle::new("task_7").unwrap())
        .await
        .unwrap();
    assert_eq!(outcome.status, TaskStatus::Failed);
    let failure = outcome.failure.unwrap();
    assert_eq!(failure.code.as_deref(), Some("500"));
    assert_eq!(failure.message.as_deref(), Some("internal render error"));
}

#[tokio::test]
async fn poll_queued_maps_to_submitted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/recordInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"taskId": "task_8", "state": "waiting"},
        })))
        .mount(&server)
        .await;

    let outcome = registry(&server)
        .adapter(ProviderKind::Wan25)
        .poll(&ProviderJobHandle::new("task_8").unwrap())
        .await
        .unwrap();
    assert_eq!(outcome.status, TaskStatus::Submitted);
}

#[tokio::test]
async fn slow_provider_times_out_as_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/recordInfo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 200, "data": {"state": "generating"}}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = ProviderConfig::new("test-key", &server.uri()).unwrap();
    config.request_timeout_secs = 1;
    let registry = ProviderRegistry::from_config(&config).unwrap();

    let err = registry
        .adapter(ProviderKind::Veo31Fast)
        .poll(&ProviderJobHandle::new("task_slow").unwrap())
        .await
        .unwrap_err();
    assert!(err.is_timeout());
    assert!(err.is_retryable());
    assert_matches!(err, ProviderError::Transport { provider: ProviderKind::Veo31Fast, .. });
}

#[tokio::test]
async fn rejection_with_unexpected_data_is_business_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/createTask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 402,
            "msg": "Insufficient credits",
            "data": "n/a",
        })))
        .mount(&server)
        .await;

    let err = registry(&server)
        .adapter(ProviderKind::KlingV25)
        .submit(&GenerationRequest::new("kling", "p"), CALLBACK)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ProviderError::Business { provider: ProviderKind::KlingV25, code: 402, message }
            if message == "Insufficient credits"
    );
}

#[tokio::test]
async fn business_message_prefers_message_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/createTask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 422,
            "msg": "error",
            "message": "prompt flagged by moderation",
            "data": null,
        })))
        .mount(&server)
        .await;

    let err = registry(&server)
        .adapter(ProviderKind::Sora2)
        .submit(&GenerationRequest::new("sora-2", "p"), CALLBACK)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ProviderError::Business { code: 422, message, .. } if message == "prompt flagged by moderation"
    );
}

#[tokio::test]
async fn gpt_image_uses_its_own_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/gpt4o-image/generate"))
        .and(body_partial_json(json!({
            "prompt": "a lighthouse at dusk",
            "size": "2:3",
            "nVariants": 2,
            "callBackUrl": CALLBACK,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "success",
            "data": {"taskId": "gpt_1"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/gpt4o-image/record-info"))
        .and(query_param("taskId", "gpt_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "success",
            "data": {
                "taskId": "gpt_1",
                "successFlag": 1,
                "response": {"resultUrls": ["https://cdn.example/a.png", "https://cdn.example/b.png"]},
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry(&server);
    let adapter = registry.adapter(ProviderKind::GptImage);

    let mut req = GenerationRequest::new("gpt-image-1", "a lighthouse at dusk");
    req.aspect_ratio = Some(AspectRatio::Ratio3x4);
    req.count = Some(2);
    let handle = adapter.submit(&req, CALLBACK).await.unwrap();
    assert_eq!(handle.provider_task_id(), "gpt_1");

    let outcome = adapter.poll(&handle).await.unwrap();
    assert_eq!(outcome.status, TaskStatus::Succeeded);
    assert_eq!(outcome.result_urls.len(), 2);
}

#[tokio::test]
async fn kling_multi_shot_submit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/createTask"))
        .and(body_partial_json(json!({
            "model": "kling-3.0/video",
            "input": {
                "multi_shots": true,
                "sound": true,
                "duration": 10,
                "multi_prompt": [
                    {"prompt": "she opens the door", "duration": 4},
                    {"prompt": "she steps into the rain", "duration": 6},
                ],
            },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"taskId": "kling_ms_1"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut req = GenerationRequest::new("kling-v3.0", "");
    req.character_image_url = Some("https://cdn.example/oc.png".into());
    req.multi_prompt = vec![
        ShotPrompt { prompt: "she opens the door".into(), duration_seconds: 4 },
        ShotPrompt { prompt: "she steps into the rain".into(), duration_seconds: 6 },
    ];

    let registry = registry(&server);
    let adapter = registry.adapter(ProviderKind::KlingV30);
    assert_eq!(adapter.calculate_cost(&req).unwrap().amount, 900);
    let handle = adapter.submit(&req, CALLBACK).await.unwrap();
    assert_eq!(handle.provider_task_id(), "kling_ms_1");
}

#[tokio::test]
async fn blank_task_id_is_contract_error_with_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/createTask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "success",
            "data": {"taskId": "   "},
        })))
        .mount(&server)
        .await;

    let err = registry(&server)
        .adapter(ProviderKind::Wan25)
        .submit(&GenerationRequest::new("wan", "p"), CALLBACK)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ProviderError::Contract { provider: ProviderKind::Wan25, detail, raw }
            if detail.contains("must not be empty") && raw.contains("\"taskId\"")
    );
}
