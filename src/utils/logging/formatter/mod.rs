//! Formatter module for custom log formatting

pub mod styling;

use chrono::Local;
use console::style;
use std::fmt::{self as std_fmt, Debug};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};

use styling::{format_level, get_prefix, style_message};

pub struct CleanFormatter {
    show_timestamps: bool,
    use_color: bool,
}

impl CleanFormatter {
    pub fn new(show_timestamps: bool, use_color: bool) -> Self {
        Self {
            show_timestamps,
            use_color,
        }
    }

    fn format_message(&self, message: &str, level: &tracing::Level) -> String {
        let level_indicator = format_level(level, self.use_color);
        let level_prefix = if level_indicator.is_empty() {
            String::new()
        } else {
            format!("{} ", level_indicator)
        };

        format!(
            "{} {}{}",
            get_prefix(message),
            level_prefix,
            style_message(message, level, self.use_color)
        )
    }
}

impl<S, N> FormatEvent<S, N> for CleanFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std_fmt::Result {
        let metadata = event.metadata();
        let message = {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            visitor.message
        };

        let mut output = String::new();

        if self.show_timestamps {
            let now = Local::now();
            let timestamp = if self.use_color {
                style(now.format("%H:%M:%S").to_string()).dim().to_string()
            } else {
                now.format("%H:%M:%S").to_string()
            };
            output.push_str(&format!("[{}] ", timestamp));
        }

        // Innermost span name tells which pass is talking.
        if let Some(span) = ctx.lookup_current() {
            output.push_str(&format!("{}: ", span.name()));
        }

        output.push_str(&self.format_message(&message, metadata.level()));

        writeln!(writer, "{}", output)
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value).trim_matches('"').to_string();
        }
    }
}
