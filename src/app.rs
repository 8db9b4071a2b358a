use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::api::RecordStore;
use crate::model::{parse_due_input, DueInput, NewTask, Task};
use crate::storage;
use crate::theme::{detect_system_theme, get_theme_colors, Theme, ThemeColors};

/// Toast 消息
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// New Task 弹窗的输入焦点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
    Due,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Due,
            FormField::Due => FormField::Title,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Title => FormField::Due,
            FormField::Description => FormField::Title,
            FormField::Due => FormField::Description,
        }
    }
}

/// New Task 弹窗状态（三个输入框 + 当前焦点）
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub text: String,
    pub description: String,
    pub due: String,
    pub focus: FormField,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前焦点字段的可变引用
    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.text,
            FormField::Description => &mut self.description,
            FormField::Due => &mut self.due,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.field_mut().push(c);
    }

    pub fn delete_char(&mut self) {
        self.field_mut().pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }
}

/// 全局应用状态：内存中的任务列表镜像 + 各弹窗的瞬时状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,
    /// 任务列表（远端表的本地镜像，created_at 倒序）
    pub tasks: Vec<Task>,
    /// 列表选择状态
    pub list_state: ListState,
    /// 远端 record store（Finish All 会跨线程共享）
    store: Arc<dyn RecordStore>,
    /// New Task 弹窗（None 表示未打开）
    pub new_task: Option<TaskForm>,
    /// Finish All 完成后的阻塞确认消息
    pub ack_dialog: Option<String>,
    /// Toast 提示
    pub toast: Option<Toast>,
    /// Loading 消息（Finish All 批次进行中）
    pub loading_message: Option<String>,
    /// Finish All 批次完成通知通道
    finish_rx: Option<mpsc::Receiver<()>>,
    /// 当前主题
    pub theme: Theme,
    /// 当前颜色方案
    pub colors: ThemeColors,
    /// 是否显示主题选择器
    pub show_theme_selector: bool,
    /// 主题选择器当前选中索引
    pub theme_selector_index: usize,
    /// 上次检测到的系统主题（用于 Auto 模式检测变化）
    last_system_dark: bool,
}

impl App {
    pub fn new(store: Arc<dyn RecordStore>, theme: Theme) -> Self {
        let last_system_dark = detect_system_theme();
        let colors = get_theme_colors(theme);

        Self {
            should_quit: false,
            tasks: Vec::new(),
            list_state: ListState::default(),
            store,
            new_task: None,
            ack_dialog: None,
            toast: None,
            loading_message: None,
            finish_rx: None,
            theme,
            colors,
            show_theme_selector: false,
            theme_selector_index: 0,
            last_system_dark,
        }
    }

    /// Finish All 批次是否进行中
    pub fn is_busy(&self) -> bool {
        self.finish_rx.is_some()
    }

    // ========== 列表操作 ==========

    /// 整表重载。失败时保留旧状态，不打扰用户。
    pub fn refresh(&mut self) {
        if let Ok(tasks) = self.store.list_all() {
            self.tasks = tasks;
            self.ensure_selection();
        }
    }

    /// 确保选中项落在列表范围内
    pub fn ensure_selection(&mut self) {
        if self.tasks.is_empty() {
            self.list_state.select(None);
            return;
        }
        match self.list_state.selected() {
            None => self.list_state.select(Some(0)),
            Some(i) if i >= self.tasks.len() => self.list_state.select(Some(self.tasks.len() - 1)),
            Some(_) => {}
        }
    }

    /// 选中下一项
    pub fn select_next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((current + 1) % self.tasks.len()));
    }

    /// 选中上一项
    pub fn select_previous(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let previous = if current == 0 {
            self.tasks.len() - 1
        } else {
            current - 1
        };
        self.list_state.select(Some(previous));
    }

    /// 翻转选中任务的完成标记，用服务端返回的行原位替换
    pub fn toggle_selected(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let Some(task) = self.tasks.get(index) else {
            return;
        };

        if let Ok(updated) = self.store.set_completed(&task.id, !task.completed) {
            if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
                *slot = updated;
            }
        }
        // 失败：不动
    }

    /// 删除选中任务
    pub fn delete_selected(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let Some(task) = self.tasks.get(index) else {
            return;
        };

        let id = task.id.clone();
        if self.store.delete(&id).is_ok() {
            self.tasks.retain(|t| t.id != id);
            self.ensure_selection();
        }
    }

    // ========== New Task 弹窗 ==========

    /// 打开 New Task 弹窗
    pub fn open_new_task(&mut self) {
        self.new_task = Some(TaskForm::new());
    }

    /// 关闭 New Task 弹窗（丢弃输入）
    pub fn close_new_task(&mut self) {
        self.new_task = None;
    }

    /// 提交 New Task 弹窗
    ///
    /// 标题去掉首尾空白后为空、或 Due 输入无法解析时不提交，输入保留。
    /// 远端失败同样保留输入，镜像不变。
    pub fn submit_new_task(&mut self) {
        let Some(form) = &self.new_task else {
            return;
        };

        let text = form.text.trim().to_string();
        if text.is_empty() {
            return;
        }

        let due = match parse_due_input(&form.due) {
            DueInput::None => None,
            DueInput::At(at) => Some(at),
            DueInput::Invalid => return,
        };

        let description = {
            let trimmed = form.description.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        let new = NewTask::new(text, description, due);
        if let Ok(task) = self.store.insert(&new) {
            // 新任务置顶；关闭弹窗即清空输入
            self.tasks.insert(0, task);
            self.list_state.select(Some(0));
            self.new_task = None;
        }
    }

    // ========== Finish All ==========

    /// 把当前加载的所有任务标记为完成
    ///
    /// 每个任务一个请求，并发发出，全部 join 后（个别失败不聚合、不上报）
    /// 通过通道通知主循环：主循环无条件整表重载并弹出阻塞确认。
    pub fn finish_all(&mut self) {
        if self.tasks.is_empty() || self.finish_rx.is_some() {
            return;
        }

        let ids: Vec<String> = self.tasks.iter().map(|t| t.id.clone()).collect();
        let store = Arc::clone(&self.store);
        let (tx, rx) = mpsc::channel();
        self.finish_rx = Some(rx);
        self.loading_message = Some("Finishing all tasks...".to_string());

        thread::spawn(move || {
            let handles: Vec<_> = ids
                .into_iter()
                .map(|id| {
                    let store = Arc::clone(&store);
                    thread::spawn(move || {
                        let _ = store.set_completed(&id, true);
                    })
                })
                .collect();

            for handle in handles {
                let _ = handle.join();
            }

            // 主循环可能已经退出，发送失败无所谓
            let _ = tx.send(());
        });
    }

    /// 主循环每帧轮询：Finish All 批次结束后重载并弹确认
    pub fn poll_finish_result(&mut self) {
        let done = match &self.finish_rx {
            Some(rx) => rx.try_recv().is_ok(),
            None => return,
        };
        if done {
            self.finish_rx = None;
            self.loading_message = None;
            self.refresh();
            self.ack_dialog = Some("All tasks marked as finished!".to_string());
        }
    }

    /// 关闭阻塞确认弹窗
    pub fn dismiss_ack(&mut self) {
        self.ack_dialog = None;
    }

    // ========== Toast ==========

    /// 显示 Toast 消息
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, Duration::from_secs(2)));
    }

    /// 更新 Toast 状态（清理过期的 Toast）
    pub fn update_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    // ========== 主题 ==========

    /// 打开主题选择器
    pub fn open_theme_selector(&mut self) {
        self.theme_selector_index = Theme::all()
            .iter()
            .position(|t| *t == self.theme)
            .unwrap_or(0);
        self.show_theme_selector = true;
    }

    /// 关闭主题选择器
    pub fn close_theme_selector(&mut self) {
        self.show_theme_selector = false;
    }

    /// 主题选择器 - 选择上一个（实时预览）
    pub fn theme_selector_previous(&mut self) {
        let len = Theme::all().len();
        self.theme_selector_index = if self.theme_selector_index == 0 {
            len - 1
        } else {
            self.theme_selector_index - 1
        };
        self.apply_theme_at_index(self.theme_selector_index);
    }

    /// 主题选择器 - 选择下一个（实时预览）
    pub fn theme_selector_next(&mut self) {
        let len = Theme::all().len();
        self.theme_selector_index = (self.theme_selector_index + 1) % len;
        self.apply_theme_at_index(self.theme_selector_index);
    }

    /// 主题选择器 - 确认选择并写入配置
    pub fn theme_selector_confirm(&mut self) {
        self.apply_theme_at_index(self.theme_selector_index);
        self.show_theme_selector = false;

        let mut config = storage::config::load_config();
        config.theme.name = self.theme.label().to_string();
        let _ = storage::config::save_config(&config);

        self.show_toast(format!("Theme: {}", self.theme.label()));
    }

    /// 应用指定索引的主题
    fn apply_theme_at_index(&mut self, index: usize) {
        if let Some(theme) = Theme::all().get(index) {
            self.theme = *theme;
            self.colors = get_theme_colors(*theme);
        }
    }

    /// 检查系统主题变化（用于 Auto 模式）
    pub fn check_system_theme(&mut self) {
        if self.theme != Theme::Auto {
            return;
        }

        let current_dark = detect_system_theme();
        if current_dark != self.last_system_dark {
            self.last_system_dark = current_dark;
            self.colors = get_theme_colors(Theme::Auto);
        }
    }

    /// 退出应用
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn app_with_store(store: &Arc<MemoryStore>) -> App {
        let dyn_store: Arc<dyn RecordStore> = Arc::clone(store) as Arc<dyn RecordStore>;
        let mut app = App::new(dyn_store, Theme::Dark);
        app.refresh();
        app
    }

    fn submit_task(app: &mut App, title: &str) {
        app.open_new_task();
        for c in title.chars() {
            app.new_task.as_mut().unwrap().input_char(c);
        }
        app.submit_new_task();
    }

    #[test]
    fn test_create_prepends_incomplete_task() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(&store);

        submit_task(&mut app, "Buy milk");
        submit_task(&mut app, "Walk the dog");

        assert_eq!(app.tasks.len(), 2);
        assert_eq!(app.tasks[0].text, "Walk the dog");
        assert_eq!(app.tasks[1].text, "Buy milk");
        assert!(app.tasks.iter().all(|t| !t.completed));
        // 成功提交后弹窗关闭（输入清空）
        assert!(app.new_task.is_none());
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_empty_title_is_a_noop() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(&store);

        submit_task(&mut app, "   ");

        assert!(app.tasks.is_empty());
        assert!(store.snapshot().is_empty());
        // 弹窗保持打开，输入保留
        assert_eq!(app.new_task.as_ref().unwrap().text, "   ");
    }

    #[test]
    fn test_invalid_due_keeps_form_open() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(&store);

        app.open_new_task();
        {
            let form = app.new_task.as_mut().unwrap();
            form.text = "Pay rent".to_string();
            form.due = "whenever".to_string();
        }
        app.submit_new_task();

        assert!(app.tasks.is_empty());
        let form = app.new_task.as_ref().unwrap();
        assert_eq!(form.text, "Pay rent");
        assert_eq!(form.due, "whenever");
    }

    #[test]
    fn test_create_failure_retains_fields() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(&store);

        app.open_new_task();
        app.new_task.as_mut().unwrap().text = "Buy milk".to_string();
        store.set_failing(true);
        app.submit_new_task();

        assert!(app.tasks.is_empty());
        assert_eq!(app.new_task.as_ref().unwrap().text, "Buy milk");
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(&store);
        submit_task(&mut app, "Buy milk");
        submit_task(&mut app, "Walk the dog");

        app.list_state.select(Some(1));
        app.toggle_selected();
        assert!(app.tasks[1].completed);
        assert!(!app.tasks[0].completed); // 其它任务不受影响

        app.toggle_selected();
        assert!(!app.tasks[1].completed);
    }

    #[test]
    fn test_toggle_failure_changes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(&store);
        submit_task(&mut app, "Buy milk");

        store.set_failing(true);
        app.toggle_selected();
        assert!(!app.tasks[0].completed);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(&store);
        submit_task(&mut app, "first");
        submit_task(&mut app, "second");
        submit_task(&mut app, "third");

        app.list_state.select(Some(1)); // "second"
        app.delete_selected();

        let titles: Vec<&str> = app.tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(titles, vec!["third", "first"]);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn test_delete_id_gone_from_store_still_clears_row() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(&store);
        submit_task(&mut app, "Buy milk");

        // 别处已经删掉了这一行；远端把“没有匹配行”也当成功
        store.delete(&app.tasks[0].id).unwrap();
        app.list_state.select(Some(0));
        app.delete_selected();

        assert!(app.tasks.is_empty());
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn test_delete_failure_changes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(&store);
        submit_task(&mut app, "Buy milk");

        store.set_failing(true);
        app.delete_selected();
        assert_eq!(app.tasks.len(), 1);
    }

    #[test]
    fn test_delete_last_clamps_selection() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(&store);
        submit_task(&mut app, "first");
        submit_task(&mut app, "second");

        app.list_state.select(Some(1));
        app.delete_selected();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_refresh_failure_keeps_prior_state() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(&store);
        submit_task(&mut app, "Buy milk");

        store.set_failing(true);
        app.refresh();
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks[0].text, "Buy milk");
    }

    #[test]
    fn test_load_orders_newest_first() {
        let base = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        let row = |id: &str, offset_mins: i64| Task {
            id: id.to_string(),
            text: id.to_string(),
            description: None,
            due_date: None,
            completed: false,
            created_at: base + chrono::Duration::minutes(offset_mins),
        };
        // 乱序存入
        let store = Arc::new(MemoryStore::with_rows(vec![
            row("b", 10),
            row("c", 30),
            row("a", 0),
        ]));
        let app = app_with_store(&store);

        let ids: Vec<&str> = app.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_finish_all_completes_every_task() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(&store);
        submit_task(&mut app, "first");
        submit_task(&mut app, "second");
        submit_task(&mut app, "third");

        app.finish_all();
        assert!(app.is_busy());
        assert!(app.loading_message.is_some());

        // 等待后台批次结束（mock store 很快）
        for _ in 0..200 {
            app.poll_finish_result();
            if app.ack_dialog.is_some() {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(
            app.ack_dialog.as_deref(),
            Some("All tasks marked as finished!")
        );
        assert!(!app.is_busy());
        assert!(app.loading_message.is_none());
        assert_eq!(app.tasks.len(), 3);
        assert!(app.tasks.iter().all(|t| t.completed));
    }

    #[test]
    fn test_finish_all_on_empty_list_is_a_noop() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(&store);

        app.finish_all();
        assert!(!app.is_busy());
        assert!(app.loading_message.is_none());
    }

    #[test]
    fn test_form_focus_cycles() {
        let mut form = TaskForm::new();
        assert_eq!(form.focus, FormField::Title);
        form.focus_next();
        assert_eq!(form.focus, FormField::Description);
        form.focus_next();
        assert_eq!(form.focus, FormField::Due);
        form.focus_next();
        assert_eq!(form.focus, FormField::Title);
        form.focus_previous();
        assert_eq!(form.focus, FormField::Due);
    }

    #[test]
    fn test_form_edits_focused_field() {
        let mut form = TaskForm::new();
        form.input_char('a');
        form.focus_next();
        form.input_char('b');
        form.focus_next();
        form.input_char('c');
        form.delete_char();
        assert_eq!(form.text, "a");
        assert_eq!(form.description, "b");
        assert_eq!(form.due, "");
    }
}
