//! 任务列表组件

use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::model::{format_due, Task};
use crate::theme::ThemeColors;

/// 渲染任务列表
pub fn render(
    frame: &mut Frame,
    area: Rect,
    tasks: &[Task],
    state: &mut ListState,
    colors: &ThemeColors,
) {
    let now = Utc::now();
    let items: Vec<ListItem> = tasks.iter().map(|task| list_item(task, now, colors)).collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Tasks ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border)),
        )
        .highlight_style(Style::default().bg(colors.bg_secondary));

    frame.render_stateful_widget(list, area, state);
}

/// 单个任务的展示：标题行 + 描述行 + 可选的截止时间行
fn list_item<'a>(task: &'a Task, now: chrono::DateTime<Utc>, colors: &ThemeColors) -> ListItem<'a> {
    let (mark, mark_style) = if task.completed {
        ("[✓]", Style::default().fg(colors.done))
    } else {
        ("[ ]", Style::default().fg(colors.muted))
    };

    let title_style = if task.completed {
        Style::default()
            .fg(colors.muted)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
            .fg(colors.text)
            .add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::from(vec![
        Span::raw(" "),
        Span::styled(mark, mark_style),
        Span::raw(" "),
        Span::styled(task.text.as_str(), title_style),
    ])];

    let description_line = match task.description.as_deref() {
        Some(description) if !description.is_empty() => Line::from(Span::styled(
            format!("     {}", description),
            Style::default().fg(colors.muted),
        )),
        _ => Line::from(Span::styled(
            "     no description",
            Style::default()
                .fg(colors.muted)
                .add_modifier(Modifier::ITALIC),
        )),
    };
    lines.push(description_line);

    if let Some(due) = task.due_date {
        let due_style = if task.is_overdue(now) {
            Style::default().fg(colors.warning)
        } else {
            Style::default().fg(colors.due)
        };
        lines.push(Line::from(Span::styled(
            format!("     Due: {}", format_due(due)),
            due_style,
        )));
    }

    ListItem::new(lines)
}
