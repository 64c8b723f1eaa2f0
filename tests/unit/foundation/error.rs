use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PathglideError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(PathglideError::path("x").to_string().contains("path error:"));
    assert!(
        PathglideError::playback("x")
            .to_string()
            .contains("playback error:")
    );
}

#[test]
fn json_errors_map_to_serde() {
    let err: PathglideError = serde_json::from_str::<f64>("nope").unwrap_err().into();
    assert!(matches!(err, PathglideError::Serde(_)));
    assert!(err.to_string().starts_with("serialization error:"));
}
