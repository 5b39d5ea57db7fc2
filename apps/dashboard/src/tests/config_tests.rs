use super::*;

use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let mut settings = Settings::default();
    apply_env(&mut settings, lookup_from(&[]));
    assert_eq!(settings, Settings::default());
    assert!(settings.seed_demo_data);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
        database_url = "sqlite://./tmp/clients.db"
        seed_demo_data = false
        "#,
    )
    .expect("valid toml");

    assert_eq!(settings.database_url, "sqlite://./tmp/clients.db");
    assert!(!settings.seed_demo_data);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn malformed_file_is_an_error() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "seed_demo_data = \"maybe\"").is_err());
}

#[test]
fn app_prefixed_env_wins_over_plain() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        lookup_from(&[
            ("DATABASE_URL", "sqlite://plain.db"),
            ("APP__DATABASE_URL", "sqlite://prefixed.db"),
            ("APP__LOG_FILTER", "debug,sqlx=warn"),
        ]),
    );
    assert_eq!(settings.database_url, "sqlite://prefixed.db");
    assert_eq!(settings.log_filter, "debug,sqlx=warn");
}

#[test]
fn unparseable_seed_flag_is_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, lookup_from(&[("APP__SEED_DEMO_DATA", "perhaps")]));
    assert!(settings.seed_demo_data);

    apply_env(&mut settings, lookup_from(&[("APP__SEED_DEMO_DATA", "OFF")]));
    assert!(!settings.seed_demo_data);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let temp = tempfile::tempdir().expect("tempdir");
    let settings = load_settings(&temp.path().join("absent.toml")).expect("settings");
    assert_eq!(settings.seed_demo_data, Settings::default().seed_demo_data);
}

#[test]
fn database_url_accepts_plain_paths_and_blank_values() {
    assert_eq!(
        prepare_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(prepare_database_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(prepare_database_url("   "), Settings::default().database_url);
}
