// File: crates/figwire-core/src/backend.rs
// Summary: Renderer seam; backends draw what the render driver tells them to.

use std::io;
use std::path::Path;

use crate::options::OptionSet;

/// A rendering backend driven by [`render`](crate::render::render).
///
/// Calls arrive in a fixed order: `begin_figure`, the label/title setters
/// that apply, one `draw_*` per series in stream order, `show_legend` (only
/// when at least one series is labeled), and finally at most one `save_to`.
///
/// Which option names do anything is backend-defined; unknown options must
/// be ignored, not rejected.
pub trait RenderBackend {
    /// Start a figure of the given size in producer units.
    fn begin_figure(&mut self, width: f64, height: f64);

    fn set_x_label(&mut self, text: &str);
    fn set_y_label(&mut self, text: &str);
    fn set_title(&mut self, text: &str);

    fn draw_line(&mut self, x: &[f64], y: &[f64], label: Option<&str>, options: &OptionSet);

    fn draw_scatter(&mut self, x: &[f64], y: &[f64], label: Option<&str>, options: &OptionSet);

    fn draw_error_bars(
        &mut self,
        x: &[f64],
        y: &[f64],
        y_err: &[f64],
        label: Option<&str>,
        options: &OptionSet,
    );

    fn show_legend(&mut self);

    /// Persist the figure. The driver has already created the parent
    /// directories of `path`.
    fn save_to(&mut self, path: &Path) -> io::Result<()>;
}
