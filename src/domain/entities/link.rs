//! Link entity representing a short code to target URL mapping.

use chrono::{DateTime, Utc};

/// A short link row.
///
/// `code` is the primary key. Deletion is soft: the row stays in the store
/// with `deleted = true` and its code becomes eligible for reuse, at which
/// point the counters are reset for the new occupant.
#[derive(Debug, Clone)]
pub struct Link {
    pub code: String,
    pub target_url: String,
    pub deleted: bool,
    pub total_clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        code: String,
        target_url: String,
        deleted: bool,
        total_clicks: i64,
        last_clicked: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            target_url,
            deleted,
            total_clicks,
            last_clicked,
            created_at,
        }
    }

    /// A freshly assigned link: zero clicks, not deleted, created now.
    pub fn fresh(code: String, target_url: String) -> Self {
        Self {
            code,
            target_url,
            deleted: false,
            total_clicks: 0,
            last_clicked: None,
            created_at: Utc::now(),
        }
    }

    /// Returns true if the link is live, i.e. not soft-deleted.
    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_link_starts_unclicked() {
        let link = Link::fresh("abc123".to_string(), "https://example.com".to_string());

        assert_eq!(link.code, "abc123");
        assert_eq!(link.target_url, "https://example.com");
        assert_eq!(link.total_clicks, 0);
        assert!(link.last_clicked.is_none());
        assert!(link.is_active());
    }

    #[test]
    fn test_deleted_link_is_not_active() {
        let link = Link::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            true,
            7,
            Some(Utc::now()),
            Utc::now(),
        );

        assert!(!link.is_active());
        assert_eq!(link.total_clicks, 7);
    }
}
