//! UI 渲染入口

pub mod components;

use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Widget},
    Frame,
};

use crate::app::App;

use self::components::{
    ack_dialog, empty_state, footer, header, task_form, task_list, theme_selector, toast,
};

/// 渲染整个界面
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let colors = app.colors;

    // 填充整个背景
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    let [header_area, list_area, footer_area] = Layout::vertical([
        Constraint::Length(header::HEADER_HEIGHT),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .areas(area);

    // Header：标题 + 统计
    let done_count = app.tasks.iter().filter(|t| t.completed).count();
    let open_count = app.tasks.len() - done_count;
    header::render(frame, header_area, open_count, done_count, &colors);

    // 列表 / 空状态
    if app.tasks.is_empty() {
        empty_state::render(frame, list_area, &colors);
    } else {
        task_list::render(frame, list_area, &app.tasks, &mut app.list_state, &colors);
    }

    // Footer：快捷键提示
    footer::render(frame, footer_area, !app.tasks.is_empty(), &colors);

    // 弹窗层
    if let Some(form) = &app.new_task {
        task_form::render(frame, form, &colors);
    }

    if app.show_theme_selector {
        theme_selector::render(frame, app.theme_selector_index, &colors);
    }

    if let Some(message) = &app.ack_dialog {
        ack_dialog::render(frame, message, &colors);
    }

    // Loading 优先于普通 Toast
    if let Some(message) = &app.loading_message {
        toast::render_loading(frame, message, &colors);
    } else if let Some(t) = &app.toast {
        toast::render(frame, &t.message, &colors);
    }
}
