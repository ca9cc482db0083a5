use std::env;

pub const DEFAULT_PORT: u16 = 8888;
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a storytelling scriptwriter. Create a compelling 30-60 second video script from the following ideas.";

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Upstream credential. `None` is not fatal at startup; requests answer 500 instead.
    pub api_key: Option<String>,
    pub api_url: String,
    /// Instruction prepended to the user's input when the request carries none.
    pub system_prompt: String,
    /// Echo diagnostic detail in 500 responses.
    pub development: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let api_key = lookup("CLAUDE_API_KEY").filter(|value| !value.trim().is_empty());

        let api_url = lookup("CLAUDE_API_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let system_prompt = lookup("SCRIPT_SYSTEM_PROMPT")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

        let development = lookup("RELAY_ENV")
            .map(|value| value.eq_ignore_ascii_case("development"))
            .unwrap_or(false);

        Self {
            port,
            api_key,
            api_url,
            system_prompt,
            development,
        }
    }
}
