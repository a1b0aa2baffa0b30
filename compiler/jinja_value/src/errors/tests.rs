use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_factory_message_matches_kind() {
    let err = invalid_field("width");
    assert_eq!(err.message, err.kind.to_string());
    assert_eq!(err.message, "invalid field access: width");
    assert!(err.is_invalid_field());
}

#[test]
fn test_type_mismatch_message() {
    let err = type_mismatch("map", "int");
    assert_eq!(err.to_string(), "type mismatch: expected map, got int");
    assert!(!err.is_invalid_field());
}

#[test]
fn test_wrong_arg_count_messages() {
    assert_eq!(
        wrong_arg_count("range", 1, 3, 0).to_string(),
        "range expects 1 to 3 arguments, got 0"
    );
    assert_eq!(
        wrong_arg_count("upper", 1, 1, 2).to_string(),
        "upper expects 1 argument, got 2"
    );
}

#[test]
fn test_custom_error() {
    let err = EvalError::new("range step must not be zero");
    assert_eq!(
        err.kind,
        EvalErrorKind::Custom {
            message: "range step must not be zero".to_string()
        }
    );
    assert_eq!(err.to_string(), "range step must not be zero");
}

#[test]
fn test_scope_depth_message() {
    assert_eq!(
        scope_depth_exceeded(8).to_string(),
        "maximum scope depth exceeded (limit: 8)"
    );
}
