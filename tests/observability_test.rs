use ana_chatbot::infrastructure::observability::{TracingConfig, sanitize_prompt};

#[test]
fn given_blank_prompt_when_sanitizing_then_placeholder() {
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_long_accented_prompt_when_sanitizing_then_truncated_on_char_boundary() {
    let prompt = "á".repeat(150);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.starts_with(&"á".repeat(100)));
    assert!(sanitized.ends_with("... (150 chars total)"));
}

#[test]
fn given_secrets_in_prompt_when_sanitizing_then_values_are_redacted() {
    let sanitized = sanitize_prompt("PINECONE_API_KEY=pc-123 y token=abc&x=1 con Bearer xyz");

    assert!(!sanitized.contains("pc-123"));
    assert!(!sanitized.contains("abc"));
    assert!(!sanitized.contains("xyz"));
    assert_eq!(sanitized.matches("[REDACTED]").count(), 3);
    assert!(sanitized.contains("&x=1"));
}

#[test]
fn given_level_when_building_tracing_config_then_crate_filter_is_debug() {
    let config = TracingConfig::new("prod", true, "warn");

    assert_eq!(config.default_filter, "warn,ana_chatbot=debug");
    assert!(config.json_format);
    assert_eq!(config.environment, "prod");
}
