//! Search query composition.
//!
//! Translates structured filter parameters into Joplin's search query
//! syntax. A caller-supplied `raw_query` takes precedence and the
//! structured filters are then ignored entirely; the two modes are never
//! merged.

use crate::error::{JoplinError, Result};

/// Default number of search results.
pub const DEFAULT_LIMIT: u64 = 50;

/// Upper bound on search results; larger requests are clamped, not
/// rejected.
pub const MAX_LIMIT: u64 = 100;

/// Structured search parameters. Absent filters impose no constraint.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Free-text query.
    pub query: Option<String>,
    /// Restrict to a notebook.
    pub notebook_id: Option<String>,
    /// Restrict to a tag.
    pub tag_id: Option<String>,
    /// `true` for todos only, `false` for plain notes only.
    pub is_todo: Option<bool>,
    /// `true` for completed todos, `false` for open ones.
    pub is_completed: Option<bool>,
    /// Result limit; see [`SearchFilters::effective_limit`].
    pub limit: Option<u64>,
    /// Pre-formed Joplin query. When present, every structured filter above
    /// is ignored.
    pub raw_query: Option<String>,
}

impl SearchFilters {
    /// Compose the Joplin query string.
    ///
    /// Structured filters combine conjunctively; with no constraints at all
    /// the match-everything query `*` is produced.
    pub fn compose(&self) -> String {
        if let Some(raw) = self.raw_query.as_deref().filter(|q| !q.is_empty()) {
            return raw.to_string();
        }

        let mut parts: Vec<String> = Vec::new();

        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            parts.push(query.to_string());
        }
        if let Some(notebook_id) = self.notebook_id.as_deref().filter(|v| !v.is_empty()) {
            parts.push(format!("notebook:{}", notebook_id));
        }
        if let Some(tag_id) = self.tag_id.as_deref().filter(|v| !v.is_empty()) {
            parts.push(format!("tag:{}", tag_id));
        }
        match self.is_todo {
            Some(true) => parts.push("type:todo".to_string()),
            Some(false) => parts.push("type:note".to_string()),
            None => {}
        }
        match self.is_completed {
            Some(true) => parts.push("iscompleted:1".to_string()),
            Some(false) => parts.push("iscompleted:0".to_string()),
            None => {}
        }

        if parts.is_empty() {
            "*".to_string()
        } else {
            parts.join(" ")
        }
    }

    /// Resolve the result limit: default 50, values above 100 clamped,
    /// values below 1 rejected.
    pub fn effective_limit(&self) -> Result<usize> {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if limit < 1 {
            return Err(JoplinError::Validation {
                message: "limit must be at least 1".to_string(),
                detail: None,
            });
        }
        Ok(limit.min(MAX_LIMIT) as usize)
    }
}

/// Shared limit policy for the flat list endpoints (notebooks, tags).
pub fn clamp_list_limit(limit: Option<u64>) -> Result<usize> {
    SearchFilters {
        limit,
        ..Default::default()
    }
    .effective_limit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters_matches_everything() {
        assert_eq!(SearchFilters::default().compose(), "*");
    }

    #[test]
    fn test_structured_filters_compose_conjunctively() {
        let filters = SearchFilters {
            query: Some("meeting notes".to_string()),
            notebook_id: Some("nb1".to_string()),
            tag_id: Some("t1".to_string()),
            is_todo: Some(true),
            is_completed: Some(false),
            ..Default::default()
        };
        assert_eq!(
            filters.compose(),
            "meeting notes notebook:nb1 tag:t1 type:todo iscompleted:0"
        );
    }

    #[test]
    fn test_is_todo_false_means_plain_notes() {
        let filters = SearchFilters {
            is_todo: Some(false),
            ..Default::default()
        };
        assert_eq!(filters.compose(), "type:note");
    }

    #[test]
    fn test_raw_query_wins_over_structured_filters() {
        let filters = SearchFilters {
            query: Some("ignored".to_string()),
            notebook_id: Some("ignored-too".to_string()),
            is_todo: Some(true),
            raw_query: Some("title:projects".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.compose(), "title:projects");
    }

    #[test]
    fn test_limit_default() {
        assert_eq!(SearchFilters::default().effective_limit().unwrap(), 50);
    }

    #[test]
    fn test_limit_clamped_not_rejected() {
        let filters = SearchFilters {
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(filters.effective_limit().unwrap(), 100);
    }

    #[test]
    fn test_limit_below_one_rejected() {
        let filters = SearchFilters {
            limit: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            filters.effective_limit(),
            Err(JoplinError::Validation { .. })
        ));
    }

    #[test]
    fn test_list_limit_shares_policy() {
        assert_eq!(clamp_list_limit(None).unwrap(), 50);
        assert_eq!(clamp_list_limit(Some(200)).unwrap(), 100);
        assert!(clamp_list_limit(Some(0)).is_err());
    }
}
