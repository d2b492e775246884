// File: crates/figwire-render-skia/src/lib.rs
// Summary: RenderBackend implementation on Skia CPU raster surfaces.

pub mod color;
pub mod theme;

use std::fs;
use std::io;
use std::path::Path;

use figwire_core::{OptionSet, RenderBackend};
use skia_safe as skia;

pub use theme::Theme;

/// Pixels per figure unit. Producers size figures in abstract units
/// (inches, by convention); 100 dots per unit matches the usual 100 dpi.
const DOTS_PER_UNIT: f64 = 100.0;

/// Raster surface side limits, in pixels.
const MIN_SIDE: i32 = 16;
const MAX_SIDE: i32 = 10_000;

/// Screen margins around the plot area, in pixels.
#[derive(Clone, Copy, Debug)]
struct Insets {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
}

impl Default for Insets {
    fn default() -> Self {
        Self { left: 72, right: 24, top: 40, bottom: 56 }
    }
}

#[derive(Clone, Copy, Debug)]
enum SeriesKind {
    Line,
    Scatter,
    ErrorBars,
}

/// Paint parameters resolved from a series' captured options.
#[derive(Clone, Copy, Debug)]
struct SeriesStyle {
    color: skia::Color,
    line_width: f32,
    marker_size: f32,
}

struct BufferedSeries {
    kind: SeriesKind,
    x: Vec<f64>,
    y: Vec<f64>,
    /// Empty unless the series is error bars.
    y_err: Vec<f64>,
    label: Option<String>,
    style: SeriesStyle,
}

/// Buffering backend: draw calls accumulate and the figure rasterizes at
/// `save_to`. Axis ranges autoscale over all data, so nothing can be painted
/// before the last series has arrived.
///
/// Honored options: `color` (named or `#hex` string), `linewidth`/`lw`,
/// `markersize`/`ms`, and `alpha`. Anything else is ignored.
pub struct SkiaBackend {
    theme: Theme,
    insets: Insets,
    width_px: i32,
    height_px: i32,
    x_label: Option<String>,
    y_label: Option<String>,
    title: Option<String>,
    series: Vec<BufferedSeries>,
    legend: bool,
}

impl SkiaBackend {
    pub fn new() -> Self {
        Self::with_theme(Theme::dark())
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            insets: Insets::default(),
            width_px: 640,
            height_px: 480,
            x_label: None,
            y_label: None,
            title: None,
            series: Vec::new(),
            legend: false,
        }
    }

    /// Render the buffered figure to PNG bytes without touching the
    /// filesystem.
    pub fn render_to_png_bytes(&self) -> io::Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((self.width_px, self.height_px))
            .ok_or_else(|| io::Error::other("failed to create raster surface"))?;
        let canvas = surface.canvas();

        canvas.clear(self.theme.background);

        let plot_left = self.insets.left;
        let plot_right = self.width_px - self.insets.right;
        let plot_top = self.insets.top;
        let plot_bottom = self.height_px - self.insets.bottom;

        draw_grid(canvas, plot_left, plot_top, plot_right, plot_bottom, &self.theme);
        self.draw_frame_text(canvas, plot_left, plot_top, plot_right, plot_bottom);

        let (x_min, x_max, y_min, y_max) = data_bounds(&self.series);
        let xspan = (x_max - x_min).max(1e-9);
        let yspan = (y_max - y_min).max(1e-9);
        let sx = |x: f64| -> f32 {
            plot_left as f32 + ((x - x_min) / xspan) as f32 * (plot_right - plot_left) as f32
        };
        let sy = |y: f64| -> f32 {
            plot_bottom as f32 - ((y - y_min) / yspan) as f32 * (plot_bottom - plot_top) as f32
        };

        for series in &self.series {
            match series.kind {
                SeriesKind::Line => draw_line_series(canvas, series, &sx, &sy),
                SeriesKind::Scatter => draw_scatter_series(canvas, series, &sx, &sy),
                SeriesKind::ErrorBars => draw_error_bar_series(canvas, series, &sx, &sy),
            }
        }

        if self.legend {
            self.draw_legend(canvas, plot_top, plot_right);
        }

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| io::Error::other("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    fn resolve_style(&self, options: &OptionSet) -> SeriesStyle {
        let base = self.theme.palette[self.series.len() % self.theme.palette.len()];
        let mut color = options
            .get("color")
            .and_then(|v| v.as_str())
            .and_then(color::parse)
            .unwrap_or(base);
        if let Some(alpha) = options.get("alpha").and_then(|v| v.as_number()) {
            color = color.with_a((alpha.clamp(0.0, 1.0) * 255.0).round() as u8);
        }
        let line_width = number_option(options, &["linewidth", "lw"]).unwrap_or(2.0);
        let marker_size = number_option(options, &["markersize", "ms"]).unwrap_or(5.0);
        SeriesStyle {
            color,
            line_width: (line_width as f32).max(0.1),
            marker_size: (marker_size as f32).max(0.5),
        }
    }

    fn draw_frame_text(&self, canvas: &skia::Canvas, l: i32, t: i32, r: i32, b: i32) {
        let mut axis_paint = skia::Paint::default();
        axis_paint.set_color(self.theme.axis_line);
        axis_paint.set_anti_alias(true);
        axis_paint.set_stroke_width(1.5);

        // X and Y axis lines
        canvas.draw_line((l as f32, b as f32), (r as f32, b as f32), &axis_paint);
        canvas.draw_line((l as f32, t as f32), (l as f32, b as f32), &axis_paint);

        let mut text_paint = skia::Paint::default();
        text_paint.set_color(self.theme.axis_label);
        text_paint.set_anti_alias(true);
        let mut font = skia::Font::default();
        font.set_size(14.0);

        if let Some(label) = &self.x_label {
            let (w, _) = font.measure_str(label, Some(&text_paint));
            canvas.draw_str(
                label,
                (((l + r) as f32 - w) * 0.5, b as f32 + 36.0),
                &font,
                &text_paint,
            );
        }
        if let Some(label) = &self.y_label {
            canvas.draw_str(label, (8.0, t as f32 + 14.0), &font, &text_paint);
        }
        if let Some(title) = &self.title {
            let mut title_paint = skia::Paint::default();
            title_paint.set_color(self.theme.title);
            title_paint.set_anti_alias(true);
            let mut title_font = skia::Font::default();
            title_font.set_size(18.0);
            let (w, _) = title_font.measure_str(title, Some(&title_paint));
            canvas.draw_str(
                title,
                (((l + r) as f32 - w) * 0.5, t as f32 - 12.0),
                &title_font,
                &title_paint,
            );
        }
    }

    fn draw_legend(&self, canvas: &skia::Canvas, plot_top: i32, plot_right: i32) {
        let entries: Vec<(&str, skia::Color)> = self
            .series
            .iter()
            .filter_map(|s| s.label.as_deref().map(|l| (l, s.style.color)))
            .collect();
        if entries.is_empty() {
            return;
        }

        let mut font = skia::Font::default();
        font.set_size(13.0);
        let mut text_paint = skia::Paint::default();
        text_paint.set_color(self.theme.axis_label);
        text_paint.set_anti_alias(true);

        let row_h = 18.0f32;
        let swatch_w = 18.0f32;
        let pad = 8.0f32;
        let text_w = entries
            .iter()
            .map(|(label, _)| font.measure_str(label, Some(&text_paint)).0)
            .fold(0.0f32, f32::max);
        let box_w = swatch_w + 6.0 + text_w + pad * 2.0;
        let box_h = row_h * entries.len() as f32 + pad * 2.0;
        let x0 = plot_right as f32 - box_w - 8.0;
        let y0 = plot_top as f32 + 8.0;

        let mut bg = skia::Paint::default();
        bg.set_color(self.theme.legend_background);
        bg.set_anti_alias(true);
        canvas.draw_rect(skia::Rect::from_xywh(x0, y0, box_w, box_h), &bg);

        for (i, (label, swatch_color)) in entries.iter().enumerate() {
            let y = y0 + pad + row_h * i as f32 + row_h * 0.5;
            let mut swatch = skia::Paint::default();
            swatch.set_color(*swatch_color);
            swatch.set_anti_alias(true);
            swatch.set_stroke_width(3.0);
            canvas.draw_line((x0 + pad, y), (x0 + pad + swatch_w, y), &swatch);
            canvas.draw_str(*label, (x0 + pad + swatch_w + 6.0, y + 4.0), &font, &text_paint);
        }
    }
}

impl Default for SkiaBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for SkiaBackend {
    fn begin_figure(&mut self, width: f64, height: f64) {
        self.width_px = ((width * DOTS_PER_UNIT) as i32).clamp(MIN_SIDE, MAX_SIDE);
        self.height_px = ((height * DOTS_PER_UNIT) as i32).clamp(MIN_SIDE, MAX_SIDE);
        self.x_label = None;
        self.y_label = None;
        self.title = None;
        self.series.clear();
        self.legend = false;
    }

    fn set_x_label(&mut self, text: &str) {
        self.x_label = Some(text.to_string());
    }

    fn set_y_label(&mut self, text: &str) {
        self.y_label = Some(text.to_string());
    }

    fn set_title(&mut self, text: &str) {
        self.title = Some(text.to_string());
    }

    fn draw_line(&mut self, x: &[f64], y: &[f64], label: Option<&str>, options: &OptionSet) {
        let style = self.resolve_style(options);
        self.series.push(BufferedSeries {
            kind: SeriesKind::Line,
            x: x.to_vec(),
            y: y.to_vec(),
            y_err: Vec::new(),
            label: label.map(str::to_string),
            style,
        });
    }

    fn draw_scatter(&mut self, x: &[f64], y: &[f64], label: Option<&str>, options: &OptionSet) {
        let style = self.resolve_style(options);
        self.series.push(BufferedSeries {
            kind: SeriesKind::Scatter,
            x: x.to_vec(),
            y: y.to_vec(),
            y_err: Vec::new(),
            label: label.map(str::to_string),
            style,
        });
    }

    fn draw_error_bars(
        &mut self,
        x: &[f64],
        y: &[f64],
        y_err: &[f64],
        label: Option<&str>,
        options: &OptionSet,
    ) {
        let style = self.resolve_style(options);
        self.series.push(BufferedSeries {
            kind: SeriesKind::ErrorBars,
            x: x.to_vec(),
            y: y.to_vec(),
            y_err: y_err.to_vec(),
            label: label.map(str::to_string),
            style,
        });
    }

    fn show_legend(&mut self) {
        self.legend = true;
    }

    fn save_to(&mut self, path: &Path) -> io::Result<()> {
        let bytes = self.render_to_png_bytes()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)
    }
}

// ---- helpers ----------------------------------------------------------------

fn number_option(options: &OptionSet, names: &[&str]) -> Option<f64> {
    names
        .iter()
        .find_map(|name| options.get(name).and_then(|v| v.as_number()))
}

/// Data extents over every buffered series (error bars widen Y), with a 2%
/// margin. Degenerate or empty ranges widen to something drawable.
fn data_bounds(series: &[BufferedSeries]) -> (f64, f64, f64, f64) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for s in series {
        for (i, (&x, &y)) in s.x.iter().zip(&s.y).enumerate() {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            let e = s.y_err.get(i).copied().unwrap_or(0.0);
            y_min = y_min.min(y - e);
            y_max = y_max.max(y + e);
        }
    }
    if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
        return (0.0, 1.0, 0.0, 1.0);
    }
    if (x_max - x_min).abs() < 1e-9 {
        x_max = x_min + 1.0;
    }
    if (y_max - y_min).abs() < 1e-9 {
        y_max = y_min + 1.0;
    }
    let xm = (x_max - x_min) * 0.02;
    let ym = (y_max - y_min) * 0.02;
    (x_min - xm, x_max + xm, y_min - ym, y_max + ym)
}

fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 {
        return vec![start, end];
    }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

fn draw_grid(canvas: &skia::Canvas, l: i32, t: i32, r: i32, b: i32, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    // verticals
    for x in linspace(l as f64, r as f64, 10) {
        canvas.draw_line((x as f32, t as f32), (x as f32, b as f32), &paint);
    }
    // horizontals
    for y in linspace(t as f64, b as f64, 6) {
        canvas.draw_line((l as f32, y as f32), (r as f32, y as f32), &paint);
    }
}

fn draw_line_series(
    canvas: &skia::Canvas,
    series: &BufferedSeries,
    sx: impl Fn(f64) -> f32,
    sy: impl Fn(f64) -> f32,
) {
    if series.x.len() < 2 {
        return;
    }

    let mut path = skia::Path::new();
    path.move_to((sx(series.x[0]), sy(series.y[0])));
    for (&x, &y) in series.x.iter().zip(&series.y).skip(1) {
        path.line_to((sx(x), sy(y)));
    }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(series.style.line_width);
    stroke.set_color(series.style.color);

    canvas.draw_path(&path, &stroke);
}

fn draw_scatter_series(
    canvas: &skia::Canvas,
    series: &BufferedSeries,
    sx: impl Fn(f64) -> f32,
    sy: impl Fn(f64) -> f32,
) {
    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(series.style.color);

    let radius = series.style.marker_size * 0.5;
    for (&x, &y) in series.x.iter().zip(&series.y) {
        canvas.draw_circle((sx(x), sy(y)), radius, &fill);
    }
}

fn draw_error_bar_series(
    canvas: &skia::Canvas,
    series: &BufferedSeries,
    sx: impl Fn(f64) -> f32,
    sy: impl Fn(f64) -> f32,
) {
    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(series.style.line_width.min(1.5));
    stroke.set_color(series.style.color);

    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(series.style.color);

    let cap = series.style.marker_size.max(3.0);
    for i in 0..series.x.len() {
        let x = sx(series.x[i]);
        let e = series.y_err.get(i).copied().unwrap_or(0.0);
        let y_hi = sy(series.y[i] + e);
        let y_lo = sy(series.y[i] - e);

        // whisker plus caps
        canvas.draw_line((x, y_hi), (x, y_lo), &stroke);
        canvas.draw_line((x - cap, y_hi), (x + cap, y_hi), &stroke);
        canvas.draw_line((x - cap, y_lo), (x + cap, y_lo), &stroke);

        canvas.draw_circle((x, sy(series.y[i])), series.style.marker_size * 0.5, &fill);
    }
}
