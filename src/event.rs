use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::app::App;

/// 处理事件，返回 true 表示应该继续运行
pub fn handle_events(app: &mut App) -> io::Result<bool> {
    // 更新 Toast 状态
    app.update_toast();

    // 检查系统主题变化（用于 Auto 模式）
    app.check_system_theme();

    // 轮询事件（100ms 超时）
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            // 只处理按下事件
            if key.kind != KeyEventKind::Press {
                return Ok(true);
            }
            handle_key(app, key);
        }
    }

    Ok(!app.should_quit)
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // 优先处理弹窗事件

    // Finish All 完成后的阻塞确认
    if app.ack_dialog.is_some() {
        handle_ack_dialog_key(app, key);
        return;
    }

    // Finish All 批次进行中：除退出外全部忽略
    if app.is_busy() {
        if key.code == KeyCode::Char('q') {
            app.quit();
        }
        return;
    }

    // 主题选择器
    if app.show_theme_selector {
        handle_theme_selector_key(app, key);
        return;
    }

    // New Task 弹窗
    if app.new_task.is_some() {
        handle_new_task_key(app, key);
        return;
    }

    handle_list_key(app, key);
}

/// 阻塞确认弹窗：按 Enter / Esc 关闭
fn handle_ack_dialog_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
        app.dismiss_ack();
    }
}

/// 列表模式的键盘事件
fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 退出
        KeyCode::Char('q') => app.quit(),

        // 导航
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),

        // 翻转完成标记
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),

        // 删除
        KeyCode::Char('x') => app.delete_selected(),

        // 新建任务
        KeyCode::Char('a') => app.open_new_task(),

        // 全部完成
        KeyCode::Char('f') | KeyCode::Char('F') => app.finish_all(),

        // 手动重载
        KeyCode::Char('r') | KeyCode::Char('R') => app.refresh(),

        // 主题选择器
        KeyCode::Char('t') | KeyCode::Char('T') => app.open_theme_selector(),

        _ => {}
    }
}

/// New Task 弹窗的键盘事件
fn handle_new_task_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_new_task(),
        KeyCode::Enter => app.submit_new_task(),
        KeyCode::Tab => {
            if let Some(form) = app.new_task.as_mut() {
                form.focus_next();
            }
        }
        KeyCode::BackTab => {
            if let Some(form) = app.new_task.as_mut() {
                form.focus_previous();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.new_task.as_mut() {
                form.delete_char();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.new_task.as_mut() {
                form.input_char(c);
            }
        }
        _ => {}
    }
}

/// 主题选择器的键盘事件
fn handle_theme_selector_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.theme_selector_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.theme_selector_next(),
        KeyCode::Enter => app.theme_selector_confirm(),
        KeyCode::Esc => app.close_theme_selector(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MemoryStore, RecordStore};
    use crate::theme::Theme;
    use std::sync::Arc;

    fn test_app() -> App {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        App::new(store, Theme::Dark)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::from(code));
    }

    #[test]
    fn test_q_quits_from_list() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_q_in_form_does_not_quit() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        assert!(app.new_task.is_some());

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.new_task.as_ref().unwrap().text, "q");
    }

    #[test]
    fn test_tab_moves_form_focus() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('y'));

        let form = app.new_task.as_ref().unwrap();
        assert_eq!(form.text, "x");
        assert_eq!(form.description, "y");
    }

    #[test]
    fn test_esc_discards_form() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Esc);
        assert!(app.new_task.is_none());
    }

    #[test]
    fn test_ack_dialog_swallows_list_keys() {
        let mut app = test_app();
        app.ack_dialog = Some("All tasks marked as finished!".to_string());

        // 弹窗挡住列表快捷键
        press(&mut app, KeyCode::Char('a'));
        assert!(app.new_task.is_none());

        press(&mut app, KeyCode::Enter);
        assert!(app.ack_dialog.is_none());
    }
}
