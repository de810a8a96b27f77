use super::*;

#[test]
fn endpoints_are_pinned() {
    for e in Ease::ALL {
        assert!(e.apply(0.0).abs() < 1e-9, "{e:?} at 0");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-9, "{e:?} at 1");
    }
}

#[test]
fn in_out_variants_pass_through_midpoint() {
    for e in [
        Ease::InOutQuad,
        Ease::InOutCubic,
        Ease::InOutQuart,
        Ease::InOutQuint,
        Ease::InOutSine,
        Ease::InOutExpo,
    ] {
        assert!((e.apply(0.5) - 0.5).abs() < 1e-9, "{e:?}");
    }
}

#[test]
fn out_quint_front_loads_progress() {
    assert!(Ease::OutQuint.apply(0.2) > 0.6);
    assert!(Ease::InQuint.apply(0.2) < 0.01);
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::Linear.apply(-1.0), 0.0);
    assert_eq!(Ease::Linear.apply(2.0), 1.0);
}

#[test]
fn closures_are_curves() {
    let double = |x: f64| 2.0 * x;
    let curve: &dyn EasingCurve = &double;
    assert_eq!(curve.evaluate(0.75), 1.5);
    assert_eq!(Ease::InQuad.evaluate(0.5), 0.25);
}

#[test]
fn names_parse_back() {
    for e in Ease::ALL {
        assert_eq!(e.name().parse::<Ease>().unwrap(), e);
    }
    assert_eq!("Out_Quint".parse::<Ease>().unwrap(), Ease::OutQuint);
    assert!(matches!(
        "wobble".parse::<Ease>(),
        Err(FramesmithError::InvalidEasing(_))
    ));
}

#[test]
fn serde_names_match_parsed_names() {
    for ease in Ease::ALL {
        let json = serde_json::to_string(&ease).unwrap();
        assert_eq!(json, format!("\"{}\"", ease.name()));
        assert_eq!(serde_json::from_str::<Ease>(&json).unwrap(), ease);
        assert_eq!(ease.name().parse::<Ease>().unwrap(), ease);
    }
}
