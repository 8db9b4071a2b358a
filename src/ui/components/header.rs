//! 顶部标题栏

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::ThemeColors;

/// Header 高度（两行叠放标题 + 一行留白）
pub const HEADER_HEIGHT: u16 = 3;

/// 渲染标题栏：左侧 TODO / LIST 叠放，右侧任务统计
pub fn render(
    frame: &mut Frame,
    area: Rect,
    open_count: usize,
    done_count: usize,
    colors: &ThemeColors,
) {
    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "  TODO",
            Style::default()
                .fg(colors.logo)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  LIST",
            Style::default()
                .fg(colors.muted)
                .add_modifier(Modifier::BOLD),
        )),
    ]);
    frame.render_widget(title, area);

    let stats = if open_count + done_count == 0 {
        Line::from(Span::styled("no tasks  ", Style::default().fg(colors.muted)))
    } else {
        Line::from(vec![
            Span::styled(
                format!("{} open", open_count),
                Style::default().fg(colors.text),
            ),
            Span::styled(" · ", Style::default().fg(colors.muted)),
            Span::styled(
                format!("{} done", done_count),
                Style::default().fg(colors.done),
            ),
            Span::raw("  "),
        ])
    };
    frame.render_widget(Paragraph::new(stats).alignment(Alignment::Right), area);
}
