//! In-memory record store
//!
//! Backs the unit tests and `jotter tui --mock`. Rows live behind a mutex so
//! the finish-all fan-out can hit one shared store from many threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::error::{JotterError, Result};
use crate::model::{NewTask, Task};

use super::RecordStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Task>>,
    failing: AtomicBool,
}

impl MemoryStore {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Task>) -> Self {
        Self {
            rows: Mutex::new(rows),
            failing: AtomicBool::new(false),
        }
    }

    /// 预置几条示例数据（`--mock` 模式的开屏内容）
    pub fn with_samples() -> Self {
        let now = Utc::now();
        let sample = |text: &str, description: Option<&str>, due: Option<Duration>, completed: bool, age: Duration| Task {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            description: description.map(String::from),
            due_date: due.map(|d| now + d),
            completed,
            created_at: now - age,
        };

        // 倒序存放：最新的在最前
        Self::with_rows(vec![
            sample(
                "Water the plants",
                None,
                Some(Duration::hours(6)),
                false,
                Duration::minutes(5),
            ),
            sample(
                "Renew passport",
                Some("Bring the old one and two photos"),
                Some(Duration::days(10)),
                false,
                Duration::hours(3),
            ),
            sample("Buy milk", None, None, true, Duration::days(1)),
        ])
    }

    /// 让后续所有操作返回错误（测试注入）
    #[allow(dead_code)]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// 当前行快照（测试断言用，按存储顺序）
    #[allow(dead_code)]
    pub fn snapshot(&self) -> Vec<Task> {
        self.rows.lock().expect("store mutex poisoned").clone()
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(JotterError::store("injected store failure"));
        }
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn list_all(&self) -> Result<Vec<Task>> {
        self.check()?;
        let mut rows = self.rows.lock().expect("store mutex poisoned").clone();
        // 稳定排序：created_at 相同的行保持存储端顺序
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    fn insert(&self, new: &NewTask) -> Result<Task> {
        self.check()?;
        let task = Task {
            id: Uuid::new_v4().to_string(),
            text: new.text.clone(),
            description: new.description.clone(),
            due_date: new.due_date,
            completed: new.completed,
            created_at: Utc::now(),
        };
        let mut rows = self.rows.lock().expect("store mutex poisoned");
        rows.insert(0, task.clone());
        Ok(task)
    }

    fn set_completed(&self, id: &str, completed: bool) -> Result<Task> {
        self.check()?;
        let mut rows = self.rows.lock().expect("store mutex poisoned");
        let row = rows
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| JotterError::store(format!("no row with id {id}")))?;
        row.completed = completed;
        Ok(row.clone())
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.check()?;
        // 与远端语义一致：没有匹配行也算成功
        let mut rows = self.rows.lock().expect("store mutex poisoned");
        rows.retain(|task| task.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_id_and_created_at() {
        let store = MemoryStore::new();
        let task = store
            .insert(&NewTask::new("Buy milk", None, None))
            .unwrap();
        assert!(!task.id.is_empty());
        assert!(!task.completed);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_list_all_orders_newest_first() {
        let store = MemoryStore::new();
        store.insert(&NewTask::new("first", None, None)).unwrap();
        store.insert(&NewTask::new("second", None, None)).unwrap();
        store.insert(&NewTask::new("third", None, None)).unwrap();

        let rows = store.list_all().unwrap();
        let titles: Vec<&str> = rows.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_set_completed_unknown_id_is_error() {
        let store = MemoryStore::new();
        assert!(store.set_completed("missing", true).is_err());
    }

    #[test]
    fn test_delete_unknown_id_is_ok() {
        let store = MemoryStore::new();
        store.insert(&NewTask::new("keep me", None, None)).unwrap();
        store.delete("missing").unwrap();
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_failing_store_rejects_everything() {
        let store = MemoryStore::new();
        store.insert(&NewTask::new("before", None, None)).unwrap();
        store.set_failing(true);

        assert!(store.list_all().is_err());
        assert!(store.insert(&NewTask::new("after", None, None)).is_err());
        assert!(store.delete("anything").is_err());

        store.set_failing(false);
        assert_eq!(store.list_all().unwrap().len(), 1);
    }
}
