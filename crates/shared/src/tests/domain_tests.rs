use crate::{
    domain::{track_offset_percent, Direction, IndexChange, NavigationCause},
    error::{CarouselError, ErrorCode, ErrorReport},
};

#[test]
fn next_step_from_last_slide_wraps_forward() {
    let change = IndexChange::new(7, 0, 8, NavigationCause::Next);
    assert_eq!(change.direction, Direction::Forward);
    assert!(change.wrapped());
}

#[test]
fn previous_step_from_first_slide_wraps_backward() {
    let change = IndexChange::new(0, 7, 8, NavigationCause::Previous);
    assert_eq!(change.direction, Direction::Backward);
    assert!(change.wrapped());
}

#[test]
fn go_to_direction_follows_target_position() {
    let forward = IndexChange::new(2, 5, 8, NavigationCause::GoTo);
    let backward = IndexChange::new(5, 1, 8, NavigationCause::GoTo);
    assert_eq!(forward.direction, Direction::Forward);
    assert_eq!(backward.direction, Direction::Backward);
    assert!(!backward.wrapped());
}

#[test]
fn auto_advance_is_not_user_driven() {
    assert!(!NavigationCause::AutoAdvance.is_user_driven());
    assert!(NavigationCause::GoTo.is_user_driven());
}

#[test]
fn track_offset_moves_one_slide_width_per_index() {
    assert_eq!(track_offset_percent(0), 0);
    assert_eq!(IndexChange::new(2, 3, 8, NavigationCause::Next).track_offset_percent(), -300);
}

#[test]
fn index_change_serializes_with_snake_case_tags() {
    let change = IndexChange::new(1, 2, 8, NavigationCause::AutoAdvance);
    let json = serde_json::to_value(change).expect("serialize");
    assert_eq!(json["cause"], "auto_advance");
    assert_eq!(json["direction"], "forward");
    assert_eq!(json["current"], 2);
}

#[test]
fn invalid_configuration_reports_its_code() {
    let err = CarouselError::invalid_configuration("slide count must be at least 1");
    let report = ErrorReport::from(&err);
    assert_eq!(report.code, ErrorCode::InvalidConfiguration);
    assert!(report.message.contains("slide count must be at least 1"));
}

#[test]
fn later_sequence_supersedes_earlier_change() {
    let first = IndexChange::new(0, 1, 8, NavigationCause::AutoAdvance).with_sequence(4);
    let second = IndexChange::new(1, 5, 8, NavigationCause::GoTo).with_sequence(5);
    assert!(second.supersedes(&first));
    assert!(!first.supersedes(&second));
}
