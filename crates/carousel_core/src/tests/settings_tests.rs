use super::*;

use std::fs;

fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
    Some(
        vars.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
    )
}

#[test]
fn missing_file_and_empty_env_yield_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings =
        CarouselSettings::load_with_env(dir.path().join("absent.toml"), env(&[])).expect("load");

    assert_eq!(settings, CarouselSettings::default());
    assert_eq!(settings.interval(), Duration::from_secs(5));
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("carousel.toml");
    fs::write(
        &path,
        r#"
interval_ms = 2500
start_index = 2
slide_titles = ["Quizee Builder", "QuickKart", "StoryApp"]
"#,
    )
    .expect("write config");

    let settings = CarouselSettings::load_with_env(&path, env(&[])).expect("load");
    assert_eq!(settings.interval_ms, 2500);
    assert_eq!(settings.start_index, 2);
    assert_eq!(settings.slide_titles.len(), 3);
    assert!(settings.auto_advance, "unset keys keep their defaults");
}

#[test]
fn environment_overrides_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("carousel.toml");
    fs::write(&path, "interval_ms = 2500\nauto_advance = true\n").expect("write config");

    let settings = CarouselSettings::load_with_env(
        &path,
        env(&[
            ("CAROUSEL__INTERVAL_MS", "750"),
            ("CAROUSEL__AUTO_ADVANCE", "false"),
            ("CAROUSEL__SLIDE_TITLES", "One,Two"),
            ("UNRELATED_INTERVAL_MS", "1"),
        ]),
    )
    .expect("load");

    assert_eq!(settings.interval_ms, 750);
    assert!(!settings.auto_advance);
    assert_eq!(settings.slide_titles, vec!["One", "Two"]);
}

#[test]
fn zero_interval_with_auto_advance_is_rejected() {
    let err = CarouselSettings::from_toml_str("interval_ms = 0").expect_err("must fail");
    assert!(matches!(err, CarouselError::InvalidConfiguration { .. }));

    let settings = CarouselSettings::from_toml_str("interval_ms = 0\nauto_advance = false")
        .expect("disabled timer tolerates zero interval");
    assert_eq!(settings.interval_ms, 0);
}

#[test]
fn malformed_toml_is_a_settings_error() {
    let err = CarouselSettings::from_toml_str("interval_ms = \"soon\"").expect_err("must fail");
    assert!(matches!(err, CarouselError::Settings { .. }));
}

#[test]
fn rendered_toml_reloads_to_the_same_settings() {
    let settings = CarouselSettings {
        interval_ms: 1200,
        restart_on_navigate: false,
        slide_titles: vec!["Code Play".into(), "Pocket Notes".into()],
        ..CarouselSettings::default()
    };

    let rendered = settings.to_toml().expect("render");
    assert_eq!(CarouselSettings::from_toml_str(&rendered).expect("parse"), settings);
}

#[test]
fn options_carry_start_index_and_restart_policy() {
    let settings = CarouselSettings {
        start_index: 4,
        restart_on_navigate: false,
        ..CarouselSettings::default()
    };
    assert_eq!(
        settings.options(),
        CarouselOptions {
            start_index: 4,
            restart_on_navigate: false,
        }
    );
}
