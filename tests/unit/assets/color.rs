use super::*;

#[test]
fn hex_forms_parse() {
    assert_eq!(parse_css_color("#00ffff"), Some(Rgba8::rgb(0, 255, 255)));
    assert_eq!(
        parse_css_color("#00ffff40"),
        Some(Rgba8::rgba(0, 255, 255, 0x40))
    );
    assert_eq!(parse_css_color("#0ff"), Some(Rgba8::rgb(0, 255, 255)));
    assert_eq!(parse_css_color("#0ff8"), Some(Rgba8::rgba(0, 255, 255, 0x88)));
    assert_eq!(parse_css_color("  #ABCDEF "), Some(Rgba8::rgb(0xab, 0xcd, 0xef)));
}

#[test]
fn functional_and_named_forms_parse() {
    assert_eq!(
        parse_css_color("rgb(10, 20, 30)"),
        Some(Rgba8::rgb(10, 20, 30))
    );
    assert_eq!(
        parse_css_color("rgba(0,255,255,0.5)"),
        Some(Rgba8::rgba(0, 255, 255, 128))
    );
    assert_eq!(parse_css_color("Cyan"), Some(Rgba8::rgb(0, 255, 255)));
    assert_eq!(parse_css_color("transparent"), Some(Rgba8::TRANSPARENT));
}

#[test]
fn garbage_is_rejected() {
    for s in ["", "#12", "#ggg", "#12345", "rgb(1,2)", "notacolor", "#ff€f"] {
        assert_eq!(parse_css_color(s), None, "{s}");
    }
}

#[test]
fn resolve_falls_back_for_invalid_input() {
    let fb = Rgba8::rgb(1, 2, 3);
    assert_eq!(resolve_color("nope", fb), fb);
    assert_eq!(resolve_color("#ffffff", fb), Rgba8::rgb(255, 255, 255));
}

#[test]
fn svg_helpers_split_alpha() {
    let c = Rgba8::rgba(0, 255, 255, 0x40);
    assert_eq!(c.to_hex_rgb(), "#00ffff");
    assert!((c.opacity() - 64.0 / 255.0).abs() < 1e-12);
    assert_eq!(c.to_string(), "#00ffff40");
}
