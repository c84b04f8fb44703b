pub mod container;
pub mod image;
pub mod search;
pub mod task;

use chrono::{DateTime, Local};
use ratatui::style::Color;

use crate::ui::Theme;

pub use container::{ContainerRow, ContainerStatus, CONTAINER_COLUMNS};
pub use image::{ImageRow, IMAGE_COLUMNS};
pub use search::{SearchRow, SEARCH_COLUMNS};
pub use task::{Task, TaskId, TaskStatus, TASK_COLUMNS};

/// A record shown as one line of a list panel
pub trait ListRow: Clone {
    /// Cell text, in column order
    fn cells(&self) -> Vec<String>;

    /// Text the panel filter is matched against
    fn filter_label(&self) -> String;

    fn color(&self) -> Color {
        Theme::CYAN
    }
}

/// First 12 hex digits of an id, without the digest prefix
pub fn short_id(id: &str) -> String {
    id.trim_start_matches("sha256:").chars().take(12).collect()
}

pub fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|t| t.with_timezone(&Local).format("%Y/%m/%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Decimal size the way `docker images` prints it
pub fn format_size(bytes: i64) -> String {
    const UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

    let mut value = bytes.max(0) as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{}{}", text, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("sha256:0123456789abcdef"), "0123456789ab");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(999), "999B");
        assert_eq!(format_size(5_000_000), "5MB");
        assert_eq!(format_size(1_230_000_000), "1.23GB");
    }
}
