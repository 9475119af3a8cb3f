use tracing::{debug, warn};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Read the advice API key once, after loading `.env` from the working directory if present.
///
/// A missing key is not an error here: the request goes out with an empty bearer
/// token and the endpoint rejects it.
pub fn load_api_key() -> String {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("ignoring unreadable .env: {e}"),
    }
    resolve_api_key(std::env::var(API_KEY_VAR).ok())
}

fn resolve_api_key(value: Option<String>) -> String {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(key) => key,
        None => {
            warn!("{API_KEY_VAR} is not set; advice requests will be rejected");
            String::new()
        }
    }
}
