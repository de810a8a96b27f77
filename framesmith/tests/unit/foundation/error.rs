use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FramesmithError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        FramesmithError::sequence_empty("x")
            .to_string()
            .contains("empty sequence:")
    );
    assert!(
        FramesmithError::invalid_easing("x")
            .to_string()
            .contains("invalid easing:")
    );
    assert!(
        FramesmithError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn io_names_operation_and_path() {
    let err = FramesmithError::io(
        "rename",
        "frames/3-x.png",
        std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    );
    let msg = err.to_string();
    assert!(msg.contains("failed to rename"));
    assert!(msg.contains("frames/3-x.png"));
    assert!(msg.contains("gone"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FramesmithError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
