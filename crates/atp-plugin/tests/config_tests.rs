use super::*;
use std::io::Write;

#[test]
fn defaults_are_valid() {
    let config = PluginConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.max_forwarded_arity, 3);
    assert_eq!(config.binary_mode_marker, 'b');
}

#[test]
fn partial_json_keeps_defaults_for_missing_fields() {
    let config = PluginConfig::from_json_str(r#"{ "max_forwarded_arity": 5 }"#)
        .expect("config should parse");
    assert_eq!(config.max_forwarded_arity, 5);
    assert_eq!(config.yield_marker, "trio_typing.YieldType");
}

#[test]
fn unknown_fields_are_rejected() {
    let err = PluginConfig::from_json_str(r#"{ "max_arity": 5 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn identical_markers_are_rejected() {
    let err = PluginConfig::from_json_str(
        r#"{ "yield_marker": "m.Marker", "send_marker": "m.Marker" }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("must differ"));
}

#[test]
fn empty_names_are_rejected() {
    let err = PluginConfig::from_json_str(r#"{ "awaitable": " " }"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid plugin config: `awaitable` must not be empty"
    );
}

#[test]
fn loads_from_path() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{ "args_marker": "mylib.Forwarded" }}"#).expect("write");

    let config = PluginConfig::from_path(file.path()).expect("config should load");
    assert_eq!(config.args_marker, "mylib.Forwarded");

    let missing = PluginConfig::from_path(std::path::Path::new("/nonexistent/atp.json"));
    assert!(matches!(missing, Err(ConfigError::Io { .. })));
}

#[test]
fn short_name_takes_last_segment() {
    assert_eq!(PluginConfig::short_name("trio_typing.YieldType"), "YieldType");
    assert_eq!(PluginConfig::short_name("Bare"), "Bare");
}
