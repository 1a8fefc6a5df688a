use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

// Anthropic API keys: sk-ant-api03-...
static API_KEY_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"sk-ant-[a-zA-Z0-9\-_]{8,}").ok());

// Tavily API keys: tvly-...
static SEARCH_KEY_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"tvly-[a-zA-Z0-9\-_]{8,}").ok());

static BEARER_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-_\.]+").ok());

static FIELD_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r#"(["']?(?:api_key|apikey|x-api-key|token|secret)["']?\s*[:=]\s*)["']?[a-zA-Z0-9\-_\.]{8,}["']?"#,
    )
    .ok()
});

/// Redacts credentials from text before it is logged
///
/// Used on upstream error bodies, which can echo request headers or payloads.
#[derive(Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    pub const fn new() -> Self {
        Self
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let mut scrubbed = message.to_string();

        if let Some(re) = API_KEY_PATTERN.as_ref() {
            scrubbed = re.replace_all(&scrubbed, "[API_KEY_REDACTED]").into_owned();
        }
        if let Some(re) = SEARCH_KEY_PATTERN.as_ref() {
            scrubbed = re.replace_all(&scrubbed, "[API_KEY_REDACTED]").into_owned();
        }
        if let Some(re) = BEARER_PATTERN.as_ref() {
            scrubbed = re
                .replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]")
                .into_owned();
        }
        if let Some(re) = FIELD_PATTERN.as_ref() {
            scrubbed = re
                .replace_all(&scrubbed, |caps: &Captures| format!("{}[REDACTED]", &caps[1]))
                .into_owned();
        }

        scrubbed
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
