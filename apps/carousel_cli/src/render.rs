use std::time::Duration;

use shared::{
    domain::IndexChange,
    error::{CarouselError, ErrorReport},
};

pub const DEFAULT_SLIDE_COUNT: usize = 8;

const ACTIVE_DOT: char = '●';
const IDLE_DOT: char = '○';

/// Labels for every slide. Missing titles are filled with generated ones.
pub fn slide_titles(configured: &[String], count_override: Option<usize>) -> Vec<String> {
    let count = count_override.unwrap_or(if configured.is_empty() {
        DEFAULT_SLIDE_COUNT
    } else {
        configured.len()
    });

    (0..count)
        .map(|index| {
            configured
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("Slide {}", index + 1))
        })
        .collect()
}

pub fn dots(current: usize, slide_count: usize) -> String {
    (0..slide_count)
        .map(|index| if index == current { ACTIVE_DOT } else { IDLE_DOT })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn frame(titles: &[String], current: usize, auto_advance: Option<Duration>) -> String {
    let title = titles.get(current).map(String::as_str).unwrap_or_default();
    let timer = match auto_advance {
        Some(interval) => format!("auto {}ms", interval.as_millis()),
        None => "paused".to_string(),
    };
    format!(
        "[{}/{}] {title}\n{}  ({timer})",
        current + 1,
        titles.len(),
        dots(current, titles.len())
    )
}

pub fn json_line(change: &IndexChange) -> serde_json::Result<String> {
    serde_json::to_string(change)
}

pub fn error_line(err: &CarouselError) -> serde_json::Result<String> {
    serde_json::to_string(&ErrorReport::from(err))
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
