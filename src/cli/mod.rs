use clap::Parser;

use crate::llm::{ LlmConfig, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE };

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Chat LLM Provider Args ---
    /// API key for the completion provider. Without it requests go out unauthenticated and fail.
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub chat_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible provider API; `/chat/completions` is appended.
    #[arg(long, env = "CHAT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub chat_base_url: String,

    /// Model name for chat completion.
    #[arg(long, env = "CHAT_MODEL", default_value = DEFAULT_MODEL)]
    pub chat_model: String,

    /// Sampling temperature sent with every completion.
    #[arg(long, env = "CHAT_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub chat_temperature: f32,

    /// Maximum output tokens per completion.
    #[arg(long, env = "CHAT_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    pub chat_max_tokens: u32,

    /// Optional file replacing the built-in system instruction.
    #[arg(long, env = "SYSTEM_PROMPT_PATH")]
    pub system_prompt_path: Option<String>,

    // --- Server Args ---
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:3000")]
    pub server_addr: String,

    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

impl Args {
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            api_key: self.chat_api_key.clone().filter(|key| !key.is_empty()),
            completion_model: Some(self.chat_model.clone()),
            base_url: Some(self.chat_base_url.clone()),
            temperature: self.chat_temperature,
            max_tokens: self.chat_max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "disruption-chat",
            "--chat-api-key",
            "gsk_test",
            "--chat-model",
            "llama-3.1-8b-instant",
            "--chat-max-tokens",
            "512",
            "--server-addr",
            "0.0.0.0:8080",
        ]).unwrap();
        let config = args.llm_config();
        assert_eq!(config.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.completion_model.as_deref(), Some("llama-3.1-8b-instant"));
        assert_eq!(config.max_tokens, 512);
        assert_eq!(args.server_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_empty_key_is_no_key() {
        let args = Args::try_parse_from(["disruption-chat", "--chat-api-key", ""]).unwrap();
        assert!(args.llm_config().api_key.is_none());
    }
}
