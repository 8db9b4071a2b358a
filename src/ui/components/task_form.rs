//! New Task 弹窗组件

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{FormField, TaskForm};
use crate::model::{format_due, parse_due_input, DueInput};
use crate::theme::ThemeColors;

/// 渲染 New Task 弹窗：三个输入框 + 实时预览行
pub fn render(frame: &mut Frame, form: &TaskForm, colors: &ThemeColors) {
    let area = frame.area();

    // 计算弹窗尺寸
    let popup_width = 60u16.min(area.width.saturating_sub(4));
    let popup_height = 11u16;

    // 居中显示
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // 清除背景
    frame.render_widget(Clear, popup_area);

    // 外框
    let block = Block::default()
        .title(" New Task ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.highlight))
        .style(Style::default().bg(colors.bg));

    let inner_area = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    // 内部布局: 空行 + 三个输入行 + 空行 + 预览行 + 空行 + 提示行
    let [_, title_area, description_area, due_area, _, preview_area, _, hint_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner_area);

    render_field(frame, title_area, "Title", &form.text, form.focus == FormField::Title, colors);
    render_field(
        frame,
        description_area,
        "Desc ",
        &form.description,
        form.focus == FormField::Description,
        colors,
    );
    render_field(frame, due_area, "Due  ", &form.due, form.focus == FormField::Due, colors);

    // 预览行：标题缺失 / due 解析结果
    let preview_line = if form.text.trim().is_empty() {
        Line::from(Span::styled(
            "  (enter a title)",
            Style::default().fg(colors.muted),
        ))
    } else {
        match parse_due_input(&form.due) {
            DueInput::None => Line::from(Span::styled(
                "  no due date",
                Style::default().fg(colors.muted),
            )),
            DueInput::At(due) => Line::from(vec![
                Span::styled("  → due ", Style::default().fg(colors.muted)),
                Span::styled(
                    format_due(due),
                    Style::default()
                        .fg(colors.highlight)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            DueInput::Invalid => Line::from(vec![
                Span::styled("  ✗ ", Style::default().fg(colors.warning)),
                Span::styled(
                    "use YYYY-MM-DD or YYYY-MM-DD HH:MM",
                    Style::default().fg(colors.warning),
                ),
            ]),
        }
    };
    frame.render_widget(Paragraph::new(preview_line), preview_area);

    // 渲染底部提示
    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(colors.highlight)),
        Span::styled(" add  ", Style::default().fg(colors.muted)),
        Span::styled("Tab", Style::default().fg(colors.highlight)),
        Span::styled(" field  ", Style::default().fg(colors.muted)),
        Span::styled("Esc", Style::default().fg(colors.highlight)),
        Span::styled(" cancel", Style::default().fg(colors.muted)),
    ]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// 渲染一个输入行: "  {label}: {value}█"
fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    colors: &ThemeColors,
) {
    let label_style = if focused {
        Style::default()
            .fg(colors.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.muted)
    };

    let mut spans = vec![
        Span::styled(format!("  {}: ", label), label_style),
        Span::styled(value.to_string(), Style::default().fg(colors.text)),
    ];
    if focused {
        // 光标
        spans.push(Span::styled("█", Style::default().fg(colors.highlight)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
