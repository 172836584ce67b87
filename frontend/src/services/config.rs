//! Build-time configuration.
//!
//! A static WASM bundle has no environment at runtime, so settings are
//! baked in by `option_env!` when the bundle is built.

const DEFAULT_API_BASE_URL: &str = "https://iqra-server-six.vercel.app";
const DEFAULT_TOKEN_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Root of the Iqra REST API, without a trailing slash
    pub api_base_url: String,
    /// localStorage key holding the bearer token
    pub token_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_base_url = option_env!("IQRA_API_BASE_URL")
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let token_key = option_env!("IQRA_TOKEN_KEY")
            .unwrap_or(DEFAULT_TOKEN_KEY)
            .to_string();

        Self {
            api_base_url,
            token_key,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
