//! PostgREST-style REST backend
//!
//! Speaks the hosted record store dialect: table rows under
//! `{base}/rest/v1/{table}`, horizontal filters as query parameters
//! (`id=eq.{id}`), mutated rows echoed back when asked via
//! `Prefer: return=representation`.

use std::time::Duration;

use crate::error::{JotterError, Result};
use crate::model::{NewTask, Task};

use super::RecordStore;

/// 单个请求的超时时间
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Hosted record store reached over HTTP.
#[derive(Debug, Clone)]
pub struct RestStore {
    base_url: String,
    api_key: String,
    table: String,
}

impl RestStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            table: table.into(),
        }
    }

    /// Collection URL: `{base}/rest/v1/{table}`
    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    /// Horizontal filter value for an id match: `eq.{id}`
    fn id_filter(id: &str) -> String {
        format!("eq.{id}")
    }

    /// Base request with auth headers and timeout applied.
    fn request(&self, method: &str, url: &str) -> ureq::Request {
        ureq::request(method, url)
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Mutations come back as a one-element array.
    fn single_row(rows: Vec<Task>) -> Result<Task> {
        rows.into_iter()
            .next()
            .ok_or_else(|| JotterError::store("mutation returned an empty row set"))
    }
}

impl RecordStore for RestStore {
    fn list_all(&self) -> Result<Vec<Task>> {
        let response = self
            .request("GET", &self.table_url())
            .query("select", "*")
            .query("order", "created_at.desc")
            .call()?;
        Ok(response.into_json()?)
    }

    fn insert(&self, new: &NewTask) -> Result<Task> {
        let response = self
            .request("POST", &self.table_url())
            .set("Prefer", "return=representation")
            .send_json(new)?;
        Self::single_row(response.into_json()?)
    }

    fn set_completed(&self, id: &str, completed: bool) -> Result<Task> {
        let response = self
            .request("PATCH", &self.table_url())
            .query("id", &Self::id_filter(id))
            .set("Prefer", "return=representation")
            .send_json(serde_json::json!({ "completed": completed }))?;
        Self::single_row(response.into_json()?)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.request("DELETE", &self.table_url())
            .query("id", &Self::id_filter(id))
            .call()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_table_url() {
        let store = RestStore::new("https://abc.supabase.co", "key", "todos");
        assert_eq!(store.table_url(), "https://abc.supabase.co/rest/v1/todos");
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let store = RestStore::new("https://abc.supabase.co/", "key", "todos");
        assert_eq!(store.table_url(), "https://abc.supabase.co/rest/v1/todos");
    }

    #[test]
    fn test_id_filter() {
        assert_eq!(RestStore::id_filter("42"), "eq.42");
        assert_eq!(
            RestStore::id_filter("4c9c51a2-73a4-4a04-8a68-1e6a3b2d9f01"),
            "eq.4c9c51a2-73a4-4a04-8a68-1e6a3b2d9f01"
        );
    }

    #[test]
    fn test_single_row_takes_first() {
        let task = Task {
            id: "t1".to_string(),
            text: "Buy milk".to_string(),
            description: None,
            due_date: None,
            completed: false,
            created_at: Utc::now(),
        };
        let row = RestStore::single_row(vec![task.clone()]).unwrap();
        assert_eq!(row, task);
    }

    #[test]
    fn test_single_row_empty_is_store_error() {
        let err = RestStore::single_row(vec![]).unwrap_err();
        assert!(matches!(err, JotterError::Store(_)));
    }
}
