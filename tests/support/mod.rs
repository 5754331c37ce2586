use text_scene::font::Font;

/// Minimal typeface covering the characters of "Hello Three.js": every
/// glyph is a plain box outline, which is enough for layout and
/// extrusion to run end to end.
pub fn test_font() -> Font {
    let glyph = |ha: u32| format!(r#"{{ "ha": {ha}, "o": "m 0 0 l 60 0 l 60 80 l 0 80" }}"#);
    let space = r#"{ "ha": 40, "o": "" }"#.to_string();

    let mut glyphs = Vec::new();
    for c in ["H", "e", "l", "o", "T", "h", "r", ".", "j", "s", "?"] {
        glyphs.push(format!(r#""{c}": {}"#, glyph(70)));
    }
    glyphs.push(format!(r#"" ": {space}"#));

    let json = format!(
        r#"{{
            "familyName": "BoxTest",
            "resolution": 100,
            "ascender": 80,
            "descender": -20,
            "glyphs": {{ {} }}
        }}"#,
        glyphs.join(",")
    );

    Font::parse(&json).expect("test font parses")
}
