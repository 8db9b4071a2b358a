//! 主题颜色定义

use ratatui::style::Color;

use super::ThemeColors;

/// 深色主题（默认）
pub fn dark_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(24, 24, 24),           // 深灰背景
        bg_secondary: Color::Rgb(48, 48, 48), // 选中行背景
        logo: Color::Rgb(255, 213, 79),       // 便签黄
        highlight: Color::Rgb(255, 213, 79),
        text: Color::White,
        muted: Color::Rgb(128, 128, 128),
        border: Color::Rgb(68, 68, 68),
        done: Color::Rgb(0, 200, 120),     // 绿色
        due: Color::Rgb(100, 181, 246),    // 蓝色
        warning: Color::Rgb(255, 120, 90), // 橙红
    }
}

/// 浅色主题
pub fn light_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(250, 250, 250),
        bg_secondary: Color::Rgb(230, 230, 230),
        logo: Color::Rgb(180, 130, 0), // 深一点的黄，浅底上才看得清
        highlight: Color::Rgb(180, 130, 0),
        text: Color::Rgb(30, 30, 30),
        muted: Color::Rgb(120, 120, 120),
        border: Color::Rgb(200, 200, 200),
        done: Color::Rgb(0, 150, 80),
        due: Color::Rgb(33, 150, 243),
        warning: Color::Rgb(210, 80, 40),
    }
}

/// Dracula 主题
pub fn dracula_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(40, 42, 54),
        bg_secondary: Color::Rgb(68, 71, 90),
        logo: Color::Rgb(241, 250, 140), // 黄
        highlight: Color::Rgb(189, 147, 249), // 紫
        text: Color::Rgb(248, 248, 242),
        muted: Color::Rgb(98, 114, 164),
        border: Color::Rgb(68, 71, 90),
        done: Color::Rgb(80, 250, 123),   // 绿
        due: Color::Rgb(139, 233, 253),   // 青
        warning: Color::Rgb(255, 121, 98), // 橙
    }
}

/// Nord 主题
pub fn nord_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(46, 52, 64),
        bg_secondary: Color::Rgb(59, 66, 82),
        logo: Color::Rgb(235, 203, 139), // 黄
        highlight: Color::Rgb(136, 192, 208), // 青
        text: Color::Rgb(236, 239, 244),
        muted: Color::Rgb(97, 110, 136),
        border: Color::Rgb(59, 66, 82),
        done: Color::Rgb(163, 190, 140),
        due: Color::Rgb(129, 161, 193),
        warning: Color::Rgb(208, 135, 112),
    }
}
