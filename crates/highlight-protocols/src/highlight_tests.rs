use super::*;

#[test]
fn test_new_trims_text() {
    let h = Highlight::new("  Hello world \n", "https://example.com/a", None);
    assert_eq!(h.text, "Hello world");
    assert_eq!(h.url, "https://example.com/a");
    assert_eq!(h.title, UNKNOWN_TITLE);
    assert!(h.id.starts_with("highlight_"));
}

#[test]
fn test_new_keeps_title() {
    let h = Highlight::new("text", "https://example.com", Some("Example".to_string()));
    assert_eq!(h.title, "Example");
}

#[test]
fn test_blank_title_uses_placeholder() {
    let h = Highlight::new("text", "https://example.com", Some("   ".to_string()));
    assert_eq!(h.title, UNKNOWN_TITLE);
}

#[test]
fn test_ids_are_unique() {
    let a = Highlight::new("a", "https://example.com", None);
    let b = Highlight::new("a", "https://example.com", None);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_validate_ok() {
    let h = Highlight::new("Hello", "https://example.com", None);
    assert!(h.validate().is_ok());
}

#[test]
fn test_validate_empty_text() {
    let mut h = Highlight::new("Hello", "https://example.com", None);
    h.text = "   ".to_string();
    assert!(matches!(h.validate(), Err(HighlightError::Validation(_))));
}

#[test]
fn test_validate_empty_url() {
    let h = Highlight::new("Hello", "", None);
    assert!(matches!(h.validate(), Err(HighlightError::Validation(_))));
}

#[test]
fn test_validate_only_rejects_empty_url() {
    let h = Highlight::new("Hello", " ", None);
    assert!(h.validate().is_ok());
}

#[test]
fn test_validate_length_limit() {
    let at_limit = Highlight::new("a".repeat(MAX_HIGHLIGHT_CHARS), "https://e.com", None);
    assert!(at_limit.validate().is_ok());

    let over = Highlight::new("a".repeat(MAX_HIGHLIGHT_CHARS + 1), "https://e.com", None);
    let err = over.validate().unwrap_err();
    assert!(err.to_string().contains("too long"));
}

#[test]
fn test_length_counts_characters_not_bytes() {
    let h = Highlight::new("é".repeat(MAX_HIGHLIGHT_CHARS), "https://e.com", None);
    assert_eq!(h.char_len(), MAX_HIGHLIGHT_CHARS);
    assert!(h.validate().is_ok());
}

#[test]
fn test_serialization_roundtrip_fields() {
    let h = Highlight::new("Hello", "https://example.com", Some("Title".to_string()));
    let json = serde_json::to_value(&h).unwrap();
    assert_eq!(json["text"], "Hello");
    assert_eq!(json["url"], "https://example.com");
    assert!(json["timestamp"].as_str().unwrap().contains('T'));

    let parsed: Highlight = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, h);
}

#[test]
fn test_deserialize_missing_fields() {
    let parsed: Highlight = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
    assert_eq!(parsed.text, "");
    assert_eq!(parsed.title, UNKNOWN_TITLE);
    assert!(parsed.validate().is_err());
}
