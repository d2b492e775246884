// File: crates/figwire-render-skia/src/theme.rs
// Summary: Light/Dark theming and the per-series color palette.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub title: skia::Color,
    pub legend_background: skia::Color,
    /// Cycled through for series whose options pick no color.
    pub palette: [skia::Color; 6],
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 210, 210, 220),
            title: skia::Color::from_argb(255, 235, 235, 245),
            legend_background: skia::Color::from_argb(200, 28, 28, 32),
            palette: [
                skia::Color::from_argb(255, 64, 160, 255),
                skia::Color::from_argb(255, 40, 200, 120),
                skia::Color::from_argb(255, 220, 80, 80),
                skia::Color::from_argb(255, 255, 200, 60),
                skia::Color::from_argb(255, 170, 120, 255),
                skia::Color::from_argb(255, 60, 200, 220),
            ],
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 50, 50, 60),
            title: skia::Color::from_argb(255, 20, 20, 30),
            legend_background: skia::Color::from_argb(220, 240, 240, 244),
            palette: [
                skia::Color::from_argb(255, 32, 120, 200),
                skia::Color::from_argb(255, 20, 160, 90),
                skia::Color::from_argb(255, 200, 60, 60),
                skia::Color::from_argb(255, 200, 150, 30),
                skia::Color::from_argb(255, 130, 80, 200),
                skia::Color::from_argb(255, 30, 150, 170),
            ],
        }
    }
}

/// Return the built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() {
        if t.name.eq_ignore_ascii_case(name) {
            return t;
        }
    }
    Theme::dark()
}
