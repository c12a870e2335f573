use super::*;

#[test]
fn test_format_message_fills_placeholders() {
    let msg = format_message(
        diagnostic_messages::INCOMPATIBLE_TYPES,
        &["yield_ argument", "int", "declared YieldType", "str"],
    );
    assert_eq!(
        msg,
        "Incompatible types (yield_ argument \"int\", declared YieldType \"str\")"
    );
}

#[test]
fn test_code_for_message_matches_template_prefix() {
    let msg = format_message(
        diagnostic_messages::INVALID_ASYNC_GENERATOR_RETURN_TYPE,
        &["YieldType specified multiple times"],
    );
    assert_eq!(
        code_for_message(&msg),
        diagnostic_codes::INVALID_ASYNC_GENERATOR_RETURN_TYPE
    );
    assert_eq!(
        code_for_message(diagnostic_messages::TASK_STATUS_STARTED_REQUIRES_ARGUMENT),
        diagnostic_codes::TASK_STATUS_STARTED_REQUIRES_ARGUMENT
    );
    assert_eq!(
        code_for_message("something else entirely"),
        diagnostic_codes::GENERIC_FAILURE
    );
}

#[test]
fn test_every_code_has_a_template() {
    for msg in DIAGNOSTIC_MESSAGES {
        assert_eq!(get_message_template(msg.code), Some(msg.message));
    }
}

#[test]
fn test_diagnostic_serializes_flat() {
    let diag = Diagnostic::error("a.py".to_string(), 3, 4, "boom".to_string(), 9099);
    let json = serde_json::to_value(&diag).expect("serialize");
    assert_eq!(json["category"], "Error");
    assert_eq!(json["start"], 3);
    assert_eq!(json["message_text"], "boom");
}
