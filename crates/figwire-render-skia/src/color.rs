// File: crates/figwire-render-skia/src/color.rs
// Summary: Option color strings (named or #hex) to Skia colors.

use skia_safe as skia;

const NAMED: &[(&str, (u8, u8, u8))] = &[
    ("b", (0, 0, 255)),
    ("blue", (0, 0, 255)),
    ("g", (0, 128, 0)),
    ("green", (0, 128, 0)),
    ("r", (255, 0, 0)),
    ("red", (255, 0, 0)),
    ("c", (0, 255, 255)),
    ("cyan", (0, 255, 255)),
    ("m", (255, 0, 255)),
    ("magenta", (255, 0, 255)),
    ("y", (255, 255, 0)),
    ("yellow", (255, 255, 0)),
    ("k", (0, 0, 0)),
    ("black", (0, 0, 0)),
    ("w", (255, 255, 255)),
    ("white", (255, 255, 255)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
];

/// Parse an option color string: `#rrggbb`, `#rrggbbaa`, a single-letter
/// shorthand, or one of a small set of names. Unknown strings yield `None`
/// and the caller falls back to the theme palette.
pub fn parse(s: &str) -> Option<skia::Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    NAMED
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(s))
        .map(|&(_, (r, g, b))| skia::Color::from_argb(255, r, g, b))
}

fn parse_hex(hex: &str) -> Option<skia::Color> {
    match hex.len() {
        6 => {
            let v = u32::from_str_radix(hex, 16).ok()?;
            Some(skia::Color::from_argb(255, (v >> 16) as u8, (v >> 8) as u8, v as u8))
        }
        8 => {
            let v = u32::from_str_radix(hex, 16).ok()?;
            Some(skia::Color::from_argb(
                v as u8,
                (v >> 24) as u8,
                (v >> 16) as u8,
                (v >> 8) as u8,
            ))
        }
        _ => None,
    }
}
