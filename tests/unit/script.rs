use super::*;

fn ev(key: &str, at: f64) -> KeyEvent {
    KeyEvent {
        key: key.to_string(),
        at,
    }
}

#[test]
fn parses_text_form_and_sorts_stably() {
    let s: KeyScript = "s@0.3, q r@0.3\nx@0.1".parse().unwrap();
    assert_eq!(
        s.events(),
        &[ev("q", 0.0), ev("x", 0.1), ev("s", 0.3), ev("r", 0.3)]
    );
    assert_eq!(s.last_secs(), 0.3);
}

#[test]
fn empty_text_is_an_empty_script() {
    let s = KeyScript::parse(" , ").unwrap();
    assert!(s.is_empty());
    assert_eq!(s.last_secs(), 0.0);
}

#[test]
fn rejects_bad_times_and_keys() {
    assert!(KeyScript::parse("q@abc").is_err());
    assert!(KeyScript::parse("q@-1").is_err());
    assert!(KeyScript::parse("q@inf").is_err());
    assert!(KeyScript::parse("@1").is_err());
}

#[test]
fn parses_json_form() {
    let s = KeyScript::from_json_str(
        r#"{"events":[{"key":"v","at":1.5},{"key":"a","at":0.25}]}"#,
    )
    .unwrap();
    assert_eq!(s.events(), &[ev("a", 0.25), ev("v", 1.5)]);
    assert!(KeyScript::from_json_str(r#"{"evts":[]}"#).is_err());
}

#[test]
fn reports_unknown_keys_once() {
    let s = KeyScript::parse("k@0 q@0.1 k@0.2 Z@0.3").unwrap();
    assert_eq!(s.unknown_keys(), vec!["k", "Z"]);
}

#[test]
fn loads_files_by_extension() {
    let dir = std::env::temp_dir().join(format!("stagefx_script_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let txt = dir.join("keys.txt");
    std::fs::write(&txt, "q@0\nx@0.5\n").unwrap();
    let json = dir.join("keys.json");
    std::fs::write(&json, r#"{"events":[{"key":"r","at":0.0}]}"#).unwrap();

    assert_eq!(KeyScript::from_path(&txt).unwrap().events().len(), 2);
    assert_eq!(KeyScript::from_path(&json).unwrap().events(), &[ev("r", 0.0)]);
    assert!(KeyScript::from_path(dir.join("missing.txt")).is_err());
    std::fs::remove_dir_all(&dir).ok();
}
