//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};

/// Request to shorten a URL.
///
/// `url` is taken as-is; a missing field is treated as an empty string.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    #[serde(default)]
    pub url: String,
}

/// Response carrying the generated token.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub shortened: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_defaults_to_empty() {
        let request: ShortenRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.url, "");
    }

    #[test]
    fn test_non_string_url_is_rejected() {
        assert!(serde_json::from_str::<ShortenRequest>(r#"{"url": 42}"#).is_err());
    }
}
