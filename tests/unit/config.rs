use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = FxConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, FxConfig::default());
    assert_eq!(cfg.canvas().unwrap(), Canvas::new(1280, 720).unwrap());
    assert_eq!(cfg.fps, Fps::new(30, 1).unwrap());
    assert_eq!(cfg.seed, None);
}

#[test]
fn fields_override_defaults() {
    let cfg = FxConfig::from_json_str(
        r##"{
            "width": 320,
            "height": 240,
            "fps": { "num": 60, "den": 1 },
            "seed": 9,
            "palette": { "background": "#000000" }
        }"##,
    )
    .unwrap();
    assert_eq!((cfg.width, cfg.height), (320, 240));
    assert_eq!(cfg.fps.num, 60);
    assert_eq!(cfg.seed, Some(9));
    assert_eq!(cfg.palette.background.hex, 0);
    assert_eq!(cfg.palette.accent, Palette::DEFAULT.accent);
}

#[test]
fn rejects_bad_values_and_unknown_fields() {
    let err = FxConfig::from_json_str(r#"{ "width": 0 }"#).unwrap_err();
    assert!(err.to_string().contains("validation error:"));
    let err = FxConfig::from_json_str(r#"{ "fps": { "num": 30, "den": 0 } }"#).unwrap_err();
    assert!(err.to_string().contains("den"));
    let err = FxConfig::from_json_str(r#"{ "colour": 1 }"#).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = FxConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("open config JSON"));
}
