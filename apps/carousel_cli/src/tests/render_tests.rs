use super::*;

use shared::domain::NavigationCause;

#[test]
fn generated_titles_fill_the_default_ring() {
    let titles = slide_titles(&[], None);
    assert_eq!(titles.len(), DEFAULT_SLIDE_COUNT);
    assert_eq!(titles[0], "Slide 1");
    assert_eq!(titles[7], "Slide 8");
}

#[test]
fn slide_override_truncates_or_pads_configured_titles() {
    let configured = vec!["Quizee Builder".to_string(), "QuickKart".to_string()];
    assert_eq!(slide_titles(&configured, Some(1)), vec!["Quizee Builder"]);
    assert_eq!(
        slide_titles(&configured, Some(3)),
        vec!["Quizee Builder", "QuickKart", "Slide 3"]
    );
    assert!(slide_titles(&configured, Some(0)).is_empty());
}

#[test]
fn dots_highlight_the_current_slide() {
    assert_eq!(dots(2, 4), "○ ○ ● ○");
    assert_eq!(dots(0, 1), "●");
}

#[test]
fn frame_shows_position_title_and_timer() {
    let titles = slide_titles(&["A".to_string(), "B".to_string(), "C".to_string()], None);
    assert_eq!(
        frame(&titles, 1, Some(Duration::from_millis(5000))),
        "[2/3] B\n○ ● ○  (auto 5000ms)"
    );
    assert!(frame(&titles, 0, None).ends_with("(paused)"));
}

#[test]
fn json_line_carries_the_change() {
    let change = IndexChange::new(7, 0, 8, NavigationCause::Next);
    let line = json_line(&change).expect("json");
    assert!(line.contains("\"current\":0"));
    assert!(line.contains("\"direction\":\"forward\""));
}

#[test]
fn error_line_reports_code_and_message() {
    let err = CarouselError::invalid_configuration("slide count must be at least 1");
    let line = error_line(&err).expect("json");
    assert!(line.contains("\"code\":\"invalid_configuration\""));
    assert!(line.contains("slide count must be at least 1"));
}
