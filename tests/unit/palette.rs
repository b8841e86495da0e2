use super::*;

#[test]
fn channels_agree_with_packed_value() {
    let p = Palette::default();
    assert_eq!(
        p.foreground,
        PaletteColor {
            r: 227,
            g: 79,
            b: 12,
            hex: 0xe34f0c
        }
    );
    assert_eq!(
        p.background,
        PaletteColor {
            r: 181,
            g: 181,
            b: 181,
            hex: 0xb5b5b5
        }
    );
    assert_eq!(
        p.accent.to_rgba8_premul(),
        Rgba8Premul::opaque(255, 197, 215)
    );
    assert!(!p.is_dark);
}

#[test]
fn lookup_by_name() {
    let p = Palette::default();
    assert_eq!(p.get("middleground").map(|c| c.hex), Some(0x8da4aa));
    assert_eq!(p.get("highlight").map(|c| c.hex), Some(0xa38d74));
    assert_eq!(p.get("nope"), None);
}

#[test]
fn deserializes_all_color_forms() {
    let p: Palette = serde_json::from_value(serde_json::json!({
        "background": "#101010",
        "accent": 0x00ff00,
        "black": { "r": 1, "g": 2, "b": 3 },
        "is_dark": true
    }))
    .unwrap();
    assert_eq!(p.background.hex, 0x101010);
    assert_eq!(p.accent.g, 255);
    assert_eq!(p.black.hex, 0x010203);
    assert!(p.is_dark);
    assert_eq!(p.white, Palette::DEFAULT.white);
}

#[test]
fn rejects_bad_hex() {
    let r: Result<Palette, _> =
        serde_json::from_value(serde_json::json!({ "background": "#12345" }));
    assert!(r.is_err());
    let r: Result<Palette, _> = serde_json::from_value(serde_json::json!({ "white": 0x1000000 }));
    assert!(r.is_err());
}
