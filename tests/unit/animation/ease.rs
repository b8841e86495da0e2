use super::*;

const ALL: [Ease; 5] = [
    Ease::Linear,
    Ease::InSine,
    Ease::OutSine,
    Ease::InExpo,
    Ease::OutExpo,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn out_curves_lead_and_in_curves_lag() {
    assert!(Ease::OutExpo.apply(0.5) > 0.5);
    assert!(Ease::OutSine.apply(0.5) > 0.5);
    assert!(Ease::InExpo.apply(0.5) < 0.5);
    assert!(Ease::InSine.apply(0.5) < 0.5);
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::OutExpo.apply(-3.0), 0.0);
    assert_eq!(Ease::InExpo.apply(7.0), 1.0);
}
