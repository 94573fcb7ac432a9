use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8731);
    assert_eq!(config.storage.backend, "file");
    assert!(config.storage.path.is_none());
}

#[test]
fn test_summarizer_defaults() {
    let config = SummarizerConfig::default();
    assert_eq!(config.api_url, "https://api.groq.com/openai/v1/chat/completions");
    assert_eq!(config.model, "llama3-8b-8192");
    assert!((config.temperature - 0.3).abs() < f32::EPSILON);
    assert_eq!(config.max_tokens, 500);
    assert_eq!(config.timeout_seconds, 30);
    assert_eq!(config.max_input_chars, 64_000);
}

#[test]
fn test_component_timeouts() {
    let config = Config::default();
    assert_eq!(config.capture.save_timeout_ms, 5_000);
    assert_eq!(config.capture.scroll_debounce_ms, 200);
    assert_eq!(config.review.summarize_timeout_seconds, 60);
}

#[test]
fn test_base_url() {
    let server = ServerConfig {
        host: "localhost".to_string(),
        port: 9000,
    };
    assert_eq!(server.base_url(), "http://localhost:9000");
}

#[test]
fn test_resolved_api_key_prefers_config() {
    let config = SummarizerConfig {
        api_key: Some("gsk-config".to_string()),
        ..Default::default()
    };
    assert_eq!(config.resolved_api_key().as_deref(), Some("gsk-config"));
}

#[test]
fn test_resolved_api_key_ignores_blank() {
    let config = SummarizerConfig {
        api_key: Some("   ".to_string()),
        ..Default::default()
    };
    assert!(config.resolved_api_key().is_none());
}

#[test]
fn test_partial_section_uses_defaults() {
    let config: Config = toml::from_str(
        r#"
        [summarizer]
        model = "llama-3.1-8b-instant"
        "#,
    )
    .unwrap();
    assert_eq!(config.summarizer.model, "llama-3.1-8b-instant");
    assert_eq!(config.summarizer.max_tokens, 500);
    assert_eq!(config.server.port, 8731);
}
