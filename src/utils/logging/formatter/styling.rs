//! Styling for console log lines

use console::style;
use tracing::Level;

/// Formats a log level with appropriate styling
pub fn format_level(level: &Level, use_color: bool) -> String {
    if !use_color {
        match *level {
            Level::ERROR => "ERROR".to_string(),
            Level::WARN => "WARN ".to_string(),
            Level::INFO => "".to_string(), // Hide INFO prefix for cleaner output
            Level::DEBUG => "DEBUG".to_string(),
            Level::TRACE => "TRACE".to_string(),
        }
    } else {
        match *level {
            Level::ERROR => style("ERROR").red().bold().to_string(),
            Level::WARN => style("WARN ").yellow().to_string(),
            Level::INFO => "".to_string(),
            Level::DEBUG => style("DEBUG").blue().to_string(),
            Level::TRACE => style("TRACE").magenta().to_string(),
        }
    }
}

/// Marker in front of a message: plans stand out, skips are quiet.
pub fn get_prefix(message: &str) -> &'static str {
    if message.starts_with("Remux planned") || message.starts_with("✓ Remuxed") {
        "▶"
    } else if message.starts_with("Skipping") {
        "·"
    } else {
        " "
    }
}

pub fn style_message(message: &str, level: &Level, use_color: bool) -> String {
    if !use_color {
        return message.to_string();
    }

    match *level {
        Level::ERROR | Level::WARN => style(message).bold().to_string(),
        Level::INFO if get_prefix(message) == "▶" => style(message).bold().green().to_string(),
        Level::INFO => message.to_string(),
        Level::DEBUG | Level::TRACE => style(message).dim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_level_no_color() {
        assert_eq!(format_level(&Level::ERROR, false), "ERROR");
        assert_eq!(format_level(&Level::WARN, false), "WARN ");
        assert_eq!(format_level(&Level::INFO, false), "");
        assert_eq!(format_level(&Level::DEBUG, false), "DEBUG");
    }

    #[test]
    fn test_format_level_with_color() {
        let result = format_level(&Level::ERROR, true);
        assert!(result.contains("ERROR"));

        let result = format_level(&Level::INFO, true);
        assert_eq!(result, "");
    }

    #[test]
    fn test_get_prefix() {
        assert_eq!(get_prefix("Remux planned for movie.avi"), "▶");
        assert_eq!(get_prefix("Skipping movie.mkv: already mkv"), "·");
        assert_eq!(get_prefix("Probing streams"), " ");
    }

    #[test]
    fn test_style_message_no_color() {
        let msg = "Remux planned for movie.avi";
        assert_eq!(style_message(msg, &Level::INFO, false), msg);
        assert_eq!(style_message(msg, &Level::DEBUG, false), msg);
    }
}
