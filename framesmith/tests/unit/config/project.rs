use super::*;

#[test]
fn empty_project_uses_defaults() {
    let cfg = ProjectConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, ProjectConfig::default());
    assert_eq!(cfg.store.extension, ".png");
    assert!(!cfg.store.recover_existing);
    assert_eq!(cfg.animation.timing.per_frame_ms, 300);
    assert_eq!(cfg.animation.timing.total_ms, None);
    assert_eq!(cfg.animation.ease, Some(Ease::OutQuint));
    assert!(cfg.animation.loop_forever);
}

#[test]
fn sections_override_fields() {
    let cfg = ProjectConfig::from_json_str(
        r#"{
            "store": { "recover_existing": true },
            "animation": {
                "timing": { "total_ms": 2000 },
                "ease": "in-out-sine",
                "loop_forever": false
            }
        }"#,
    )
    .unwrap();
    assert!(cfg.store.recover_existing);
    assert_eq!(cfg.store.extension, ".png");
    assert_eq!(cfg.animation.timing.total_ms, Some(2000));
    assert_eq!(cfg.animation.timing.per_frame_ms, 300);
    assert_eq!(cfg.animation.ease, Some(Ease::InOutSine));
    assert!(!cfg.animation.loop_forever);
}

#[test]
fn unknown_fields_are_configuration_errors() {
    let err = ProjectConfig::from_json_str(r#"{ "store": { "ext": ".gif" } }"#).unwrap_err();
    assert!(matches!(err, FramesmithError::Configuration(_)));
}

#[test]
fn missing_out_folder_is_rejected() {
    let missing = std::env::temp_dir().join(format!("framesmith_absent_{}", std::process::id()));
    assert!(matches!(
        OutputConfig::with_out_folder(&missing),
        Err(FramesmithError::Configuration(_))
    ));
    let json = format!(
        r#"{{ "output": {{ "out_folder": {} }} }}"#,
        serde_json::to_string(&missing).unwrap()
    );
    assert!(ProjectConfig::from_json_str(&json).is_err());
}

#[test]
fn resolve_joins_relative_paths_only() {
    let cfg = OutputConfig::with_out_folder(std::env::temp_dir()).unwrap();
    assert_eq!(
        cfg.resolve("run/cleave"),
        std::env::temp_dir().join("run/cleave")
    );
    let abs = std::env::temp_dir().join("abs.gif");
    assert_eq!(cfg.resolve(&abs), abs);
    assert_eq!(OutputConfig::default().resolve("a.gif"), PathBuf::from("a.gif"));
}

#[test]
fn ease_uses_the_cli_spelling() {
    let err = ProjectConfig::from_json_str(r#"{ "animation": { "ease": "InOutSine" } }"#)
        .unwrap_err();
    assert!(matches!(err, FramesmithError::Configuration(_)));
}
