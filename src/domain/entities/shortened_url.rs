//! Shortened URL entity representing a token → destination mapping.

use chrono::{DateTime, Utc};

/// A stored short token and the URL it redirects to.
///
/// `original_url` is kept verbatim: no normalization or scheme checks are
/// applied anywhere in the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    pub id: i64,
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl ShortenedUrl {
    /// Creates a new ShortenedUrl instance.
    pub fn new(
        id: i64,
        short_url: String,
        original_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_url,
            original_url,
            created_at,
        }
    }
}

/// Input data for inserting a new mapping.
///
/// `created_at` is stamped by the caller, not by the database.
#[derive(Debug, Clone)]
pub struct NewShortenedUrl {
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewShortenedUrl {
    /// Stamps the mapping with the current wall-clock time.
    pub fn now(short_url: String, original_url: String) -> Self {
        Self {
            short_url,
            original_url,
            created_at: Utc::now(),
        }
    }

    /// Attaches the store-assigned id.
    pub fn into_stored(self, id: i64) -> ShortenedUrl {
        ShortenedUrl::new(id, self.short_url, self.original_url, self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_stored_keeps_fields() {
        let new = NewShortenedUrl::now("1b4e28ba".to_string(), "https://example.com".to_string());
        let created_at = new.created_at;

        let stored = new.into_stored(7);

        assert_eq!(stored.id, 7);
        assert_eq!(stored.short_url, "1b4e28ba");
        assert_eq!(stored.original_url, "https://example.com");
        assert_eq!(stored.created_at, created_at);
    }

    #[test]
    fn test_empty_original_url_is_kept() {
        let stored = NewShortenedUrl::now("deadbeef".to_string(), String::new()).into_stored(1);
        assert_eq!(stored.original_url, "");
    }
}
