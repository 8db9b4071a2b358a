mod colors;
mod detect;

use ratatui::style::Color;

pub use detect::detect_system_theme;

/// 主题类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Auto,
    Dark,
    Light,
    Dracula,
    Nord,
}

impl Theme {
    /// 主题显示名称
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Auto => "Auto",
            Theme::Dark => "Dark",
            Theme::Light => "Light",
            Theme::Dracula => "Dracula",
            Theme::Nord => "Nord",
        }
    }

    /// 所有主题列表
    pub fn all() -> &'static [Theme] {
        &[
            Theme::Auto,
            Theme::Dark,
            Theme::Light,
            Theme::Dracula,
            Theme::Nord,
        ]
    }

    /// 从名称创建主题（用于配置加载）
    pub fn from_name(name: &str) -> Self {
        match name {
            "Auto" => Theme::Auto,
            "Dark" => Theme::Dark,
            "Light" => Theme::Light,
            "Dracula" => Theme::Dracula,
            "Nord" => Theme::Nord,
            _ => Theme::Auto, // 默认 Auto
        }
    }
}

/// 主题颜色方案
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    /// 主背景色
    pub bg: Color,
    /// 次级背景色（选中行）
    pub bg_secondary: Color,
    /// Logo / 标题颜色
    pub logo: Color,
    /// 高亮色（快捷键、光标、弹窗边框）
    pub highlight: Color,
    /// 普通文字
    pub text: Color,
    /// 次要文字
    pub muted: Color,
    /// 边框
    pub border: Color,
    /// 已完成任务
    pub done: Color,
    /// 截止时间
    pub due: Color,
    /// 已过期的截止时间
    pub warning: Color,
}

/// 获取指定主题的颜色方案（Auto 跟随系统明暗）
pub fn get_theme_colors(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Auto => {
            if detect_system_theme() {
                colors::dark_colors()
            } else {
                colors::light_colors()
            }
        }
        Theme::Dark => colors::dark_colors(),
        Theme::Light => colors::light_colors(),
        Theme::Dracula => colors::dracula_colors(),
        Theme::Nord => colors::nord_colors(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trips_through_from_name() {
        for theme in Theme::all() {
            assert_eq!(Theme::from_name(theme.label()), *theme);
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_auto() {
        assert_eq!(Theme::from_name("Solarized"), Theme::Auto);
        assert_eq!(Theme::from_name(""), Theme::Auto);
    }
}
