use once_cell::sync::Lazy;
use regex::Regex;

static TIME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"time=(\d{2}):(\d{2}):(\d{2})\.(\d{2})").unwrap());

static SPEED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"speed=\s*([0-9.]+)x").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub time: f64,
    pub speed: Option<f32>,
    pub percent: f32,
}

/// Turns ffmpeg status lines into a completion percentage for the host's
/// progress display. The total comes from the probe the plan was built on.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressParser {
    total_duration: Option<f64>,
}

impl ProgressParser {
    pub fn new(total_duration: Option<f64>) -> Self {
        Self { total_duration }
    }

    pub fn parse_line(&self, line: &str) -> Option<Progress> {
        let captures = TIME_REGEX.captures(line)?;
        let hours: u32 = captures[1].parse().ok()?;
        let minutes: u32 = captures[2].parse().ok()?;
        let seconds: u32 = captures[3].parse().ok()?;
        let centiseconds: u32 = captures[4].parse().ok()?;

        let time = (hours * 3600 + minutes * 60 + seconds) as f64 + centiseconds as f64 / 100.0;
        let percent = match self.total_duration {
            Some(total) if total > 0.0 => ((time / total) * 100.0).min(100.0) as f32,
            _ => 0.0,
        };

        let speed = SPEED_REGEX.captures(line).and_then(|c| c[1].parse().ok());

        Some(Progress {
            time,
            speed,
            percent,
        })
    }
}
