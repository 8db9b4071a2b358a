//! 任务数据模型

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// 任务记录（远端 todos 表的一行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// 记录 ID（服务端分配，创建后不可变）
    pub id: String,
    /// 任务标题（持久化后保证非空）
    pub text: String,
    /// 描述（可选）
    #[serde(default)]
    pub description: Option<String>,
    /// 截止时间（可选，ISO-8601）
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// 完成标记
    pub completed: bool,
    /// 创建时间（服务端分配，列表唯一排序键，倒序）
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// 截止时间是否已过（未完成的任务才算过期）
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }
}

/// 新任务载荷（id / created_at 由服务端分配）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub text: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
}

impl NewTask {
    pub fn new(
        text: impl Into<String>,
        description: Option<String>,
        due_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            text: text.into(),
            description,
            due_date,
            completed: false,
        }
    }
}

/// Due 输入框的解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueInput {
    /// 输入为空：不设截止时间
    None,
    /// 解析成功的绝对时间
    At(DateTime<Utc>),
    /// 无法解析
    Invalid,
}

/// 解析 Due 输入："YYYY-MM-DD" 或 "YYYY-MM-DD HH:MM"，按本地时区转成 UTC
pub fn parse_due_input(input: &str) -> DueInput {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return DueInput::None;
    }

    let naive: Option<NaiveDateTime> = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        });

    let Some(naive) = naive else {
        return DueInput::Invalid;
    };

    // DST 间隙里的时间点没有本地表示，同样按无法解析处理
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => DueInput::At(local.with_timezone(&Utc)),
        None => DueInput::Invalid,
    }
}

/// 格式化截止时间用于列表展示（本地时区）
pub fn format_due(due: DateTime<Utc>) -> String {
    due.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_due_empty_is_none() {
        assert_eq!(parse_due_input(""), DueInput::None);
        assert_eq!(parse_due_input("   "), DueInput::None);
    }

    #[test]
    fn test_parse_due_date_only() {
        let DueInput::At(due) = parse_due_input("2026-03-14") else {
            panic!("expected a parsed timestamp");
        };
        // 当天零点（本地时区）
        let local = due.with_timezone(&Local);
        assert_eq!(local.hour(), 0);
        assert_eq!(local.minute(), 0);
    }

    #[test]
    fn test_parse_due_date_and_time() {
        let DueInput::At(due) = parse_due_input("2026-03-14 09:30") else {
            panic!("expected a parsed timestamp");
        };
        let local = due.with_timezone(&Local);
        assert_eq!(local.hour(), 9);
        assert_eq!(local.minute(), 30);
    }

    #[test]
    fn test_parse_due_garbage_is_invalid() {
        assert_eq!(parse_due_input("next tuesday"), DueInput::Invalid);
        assert_eq!(parse_due_input("2026-13-40"), DueInput::Invalid);
        assert_eq!(parse_due_input("2026-03-14 25:00"), DueInput::Invalid);
    }

    #[test]
    fn test_task_wire_format() {
        // PostgREST 风格的一行
        let json = r#"{
            "id": "4c9c51a2-73a4-4a04-8a68-1e6a3b2d9f01",
            "text": "Buy milk",
            "description": null,
            "due_date": null,
            "completed": false,
            "created_at": "2026-03-14T10:00:00+00:00"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert!(task.description.is_none());
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_new_task_serializes_nulls() {
        let new = NewTask::new("Buy milk", None, None);
        let value = serde_json::to_value(&new).unwrap();
        assert_eq!(value["text"], "Buy milk");
        assert!(value["description"].is_null());
        assert!(value["due_date"].is_null());
        assert_eq!(value["completed"], false);
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc::now();
        let mut task = Task {
            id: "t1".to_string(),
            text: "Pay rent".to_string(),
            description: None,
            due_date: Some(now - chrono::Duration::hours(1)),
            completed: false,
            created_at: now,
        };
        assert!(task.is_overdue(now));

        task.completed = true;
        assert!(!task.is_overdue(now));

        task.completed = false;
        task.due_date = Some(now + chrono::Duration::hours(1));
        assert!(!task.is_overdue(now));

        task.due_date = None;
        assert!(!task.is_overdue(now));
    }
}
