use augur_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = AugurConfig::from_toml("").unwrap();

    assert_eq!(config.storage.db_path, "augur.db");
    assert_eq!(config.storage.read_pool_size, 4);

    assert_eq!(config.mining.min_sequence_length, 10);
    assert!((config.mining.min_confidence - 0.55).abs() < f64::EPSILON);
    assert!((config.mining.min_support_ratio - 0.03).abs() < f64::EPSILON);
    assert_eq!(config.mining.max_formulas, 30);
    assert_eq!(config.mining.cluster_min_length, 20);
    assert_eq!(config.mining.color_marker, "red");
    assert_eq!(config.mining.low_max_value, 4);

    assert_eq!(config.policy.failure_threshold, 3);

    assert!(config.feed.url.is_empty());
    assert_eq!(config.feed.max_retries, 3);

    assert!(!config.adjudicator.enabled);
    assert_eq!(config.adjudicator.top_rules, 10);

    assert_eq!(config.retention.max_observations, 5_000);
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[feed]
url = "https://feed.example/api/recent"
max_retries = 5

[policy]
failure_threshold = 4
"#;
    let config = AugurConfig::from_toml(toml).unwrap();
    assert_eq!(config.feed.url, "https://feed.example/api/recent");
    assert_eq!(config.feed.max_retries, 5);
    assert_eq!(config.policy.failure_threshold, 4);
    // Non-overridden fields keep defaults
    assert_eq!(config.feed.timeout_secs, 10);
    assert_eq!(config.mining.max_formulas, 30);
}

#[test]
fn config_serde_roundtrip() {
    let config = AugurConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = AugurConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.storage.db_path, config.storage.db_path);
    assert_eq!(roundtripped.mining.max_formulas, config.mining.max_formulas);
}

#[test]
fn config_rejects_out_of_range_values() {
    assert!(AugurConfig::from_toml("[mining]\nmin_confidence = 1.5").is_err());
    assert!(AugurConfig::from_toml("[policy]\nfailure_threshold = 0").is_err());
    assert!(AugurConfig::from_toml("[mining]\nmax_formulas = 0").is_err());
    assert!(AugurConfig::from_toml("[mining]\ncolor_marker = \"  \"").is_err());
}

#[test]
fn config_reports_malformed_toml() {
    let err = AugurConfig::from_toml("[storage\ndb_path = 1").unwrap_err();
    assert!(err.to_string().contains("configuration error"));
}
