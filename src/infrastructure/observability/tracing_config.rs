/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool, level: &str) -> Self {
        Self {
            environment: environment.into(),
            json_format,
            default_filter: format!("{level},ana_chatbot=debug"),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new("local", false, "info")
    }
}
