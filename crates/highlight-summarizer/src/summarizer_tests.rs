use super::*;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "model": DEFAULT_MODEL,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

async fn sent_user_message(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    body["messages"][1]["content"].as_str().unwrap().to_string()
}

#[test]
fn test_truncate_short_input_is_borrowed() {
    let out = truncate_input("hello", 10);
    assert!(matches!(out, Cow::Borrowed(_)));
    assert_eq!(out, "hello");
}

#[test]
fn test_truncate_exact_limit_is_untouched() {
    let text = "a".repeat(64_000);
    assert_eq!(truncate_input(&text, 64_000).len(), 64_000);
}

#[test]
fn test_truncate_long_input() {
    let text = "a".repeat(64_010);
    let out = truncate_input(&text, 64_000);
    assert_eq!(out.len(), 64_000 + TRUNCATION_MARKER.len());
    assert!(out.ends_with(TRUNCATION_MARKER));
}

#[test]
fn test_truncate_respects_char_boundaries() {
    let text = "é".repeat(10);
    let out = truncate_input(&text, 4);
    assert_eq!(out, format!("éééé{}", TRUNCATION_MARKER));
}

#[test]
fn test_build_request() {
    let summarizer = ChatSummarizer::new("key".to_string())
        .with_model("custom")
        .with_temperature(0.5)
        .with_max_tokens(100);
    let request = summarizer.build_request("[1] \"text\" (from example.com)");
    assert_eq!(request.model, "custom");
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
    assert!(request.messages[1].content.starts_with("Please summarize"));
    assert!(request.messages[1].content.ends_with("(from example.com)"));
    assert_eq!(request.temperature, 0.5);
    assert_eq!(request.max_tokens, 100);
}

#[test]
fn test_defaults() {
    let summarizer = ChatSummarizer::new("key".to_string());
    assert_eq!(summarizer.api_url, DEFAULT_API_URL);
    assert_eq!(summarizer.model(), DEFAULT_MODEL);
    assert_eq!(summarizer.timeout, Duration::from_secs(30));
    assert_eq!(summarizer.max_input_chars, DEFAULT_MAX_INPUT_CHARS);
}

#[tokio::test]
async fn test_empty_input_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(completion_body("x")))
        .expect(0)
        .mount(&server)
        .await;

    let summarizer = ChatSummarizer::with_url("key".to_string(), server.uri());
    assert!(matches!(summarizer.summarize("").await, Err(SummarizeError::EmptyInput)));
    assert!(matches!(summarizer.summarize("   ").await, Err(SummarizeError::EmptyInput)));
}

#[tokio::test]
async fn test_missing_api_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(completion_body("x")))
        .expect(0)
        .mount(&server)
        .await;

    let summarizer = ChatSummarizer::with_url(String::new(), server.uri());
    let err = summarizer.summarize("some text").await.unwrap_err();
    assert!(matches!(err, SummarizeError::MissingApiKey));
}

#[tokio::test]
async fn test_summarize_success() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(completion_body("  # Themes\n\n**Key** point  ")))
        .expect(1)
        .mount(&server)
        .await;

    let summarizer = ChatSummarizer::with_url("test-key".to_string(), server.uri());
    let summary = summarizer.summarize("[1] \"Hello world\" (from example.com)").await.unwrap();
    assert_eq!(summary.text, "# Themes\n\n**Key** point");
    assert_eq!(summary.model, DEFAULT_MODEL);
}

#[tokio::test]
async fn test_sends_expected_body() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(completion_body("ok")))
        .mount(&server)
        .await;

    let summarizer = ChatSummarizer::with_url("k".to_string(), server.uri());
    summarizer.summarize("highlight text").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], DEFAULT_MODEL);
    assert_eq!(body["max_tokens"], 500);
    assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    assert_eq!(body["messages"][0]["role"], "system");
}

#[tokio::test]
async fn test_long_input_is_truncated_before_sending() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(completion_body("ok")))
        .mount(&server)
        .await;

    let summarizer = ChatSummarizer::with_url("k".to_string(), server.uri());
    let text = "b".repeat(70_000);
    summarizer.summarize(&text).await.unwrap();

    let content = sent_user_message(&server).await;
    let payload = content.strip_prefix(USER_PROMPT).unwrap();
    let kept = payload.strip_suffix(TRUNCATION_MARKER).unwrap();
    assert_eq!(kept.chars().count(), 64_000);
    assert!(kept.chars().all(|c| c == 'b'));
}

#[tokio::test]
async fn test_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_string(r#"{"error": {"message": "Rate limit reached", "type": "rate_limit"}}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let summarizer = ChatSummarizer::with_url("k".to_string(), server.uri());
    match summarizer.summarize("text").await.unwrap_err() {
        SummarizeError::RateLimited(message) => assert!(message.contains("Rate limit reached")),
        other => panic!("Expected RateLimited, got {:?}", other),
    }
}

#[tokio::test]
async fn test_authentication_failures() {
    for status in [401u16, 403] {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_string(r#"{"error": {"message": "Invalid API Key"}}"#),
            )
            .mount(&server)
            .await;

        let summarizer = ChatSummarizer::with_url("bad".to_string(), server.uri());
        let err = summarizer.summarize("text").await.unwrap_err();
        assert!(
            matches!(err, SummarizeError::AuthenticationFailed(ref m) if m == "Invalid API Key"),
            "status {} gave {:?}",
            status,
            err
        );
    }
}

#[tokio::test]
async fn test_server_error_without_json_body() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let summarizer = ChatSummarizer::with_url("k".to_string(), server.uri());
    match summarizer.summarize("text").await.unwrap_err() {
        SummarizeError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "API error: 500");
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_object_in_success_body() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"error": {"message": "model decommissioned"}}"#),
        )
        .mount(&server)
        .await;

    let summarizer = ChatSummarizer::with_url("k".to_string(), server.uri());
    let err = summarizer.summarize("text").await.unwrap_err();
    assert!(matches!(err, SummarizeError::UnexpectedResponse(ref m) if m == "model decommissioned"));
}

#[tokio::test]
async fn test_missing_choices() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": "x", "choices": []}"#))
        .mount(&server)
        .await;

    let summarizer = ChatSummarizer::with_url("k".to_string(), server.uri());
    let err = summarizer.summarize("text").await.unwrap_err();
    assert!(matches!(err, SummarizeError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn test_timeout_cancels_request() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(completion_body("late"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let summarizer = ChatSummarizer::with_url("k".to_string(), server.uri())
        .with_timeout(Duration::from_millis(50));
    let err = summarizer.summarize("text").await.unwrap_err();
    assert!(matches!(err, SummarizeError::Timeout(_)));
}

#[tokio::test]
async fn test_network_error() {
    let summarizer =
        ChatSummarizer::with_url("k".to_string(), "http://127.0.0.1:1/unreachable".to_string());
    let err = summarizer.summarize("text").await.unwrap_err();
    assert!(matches!(err, SummarizeError::Network(_)));
}
