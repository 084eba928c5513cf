use owo_colors::OwoColorize;
use smklog_types::level;

/// One-character level column: `d`, `i`, `W`, `E`, `C`, or `?` for unnamed levels.
pub fn level_marker(levelno: i64) -> &'static str {
    match levelno {
        level::DEBUG => "d",
        level::INFO => "i",
        level::WARNING => "W",
        level::ERROR => "E",
        level::CRITICAL => "C",
        _ => "?",
    }
}

/// Apply the level's color to a piece of text.
pub fn style_for_level(text: &str, levelno: i64, enable_color: bool) -> String {
    if !enable_color {
        return text.to_string();
    }
    match levelno {
        level::ERROR | level::CRITICAL => format!("{}", text.red().bold()),
        level::WARNING => format!("{}", text.yellow()),
        level::DEBUG => format!("{}", text.dimmed()),
        _ => text.to_string(),
    }
}
