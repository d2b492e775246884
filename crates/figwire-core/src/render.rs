// File: crates/figwire-core/src/render.rs
// Summary: Drives a decoded figure through a rendering backend.

use std::fs;
use std::path::Path;

use crate::backend::RenderBackend;
use crate::error::RenderError;
use crate::spec::{FigureSpec, Series};

/// Render `spec` through `backend`, saving relative to `out_dir` when the
/// figure asked to be saved.
///
/// Returns `Ok(true)` if an image was saved and `Ok(false)` if the figure's
/// save path was empty; a decode-only stream is legal and not an error.
pub fn render<B: RenderBackend>(
    spec: &FigureSpec,
    backend: &mut B,
    out_dir: &Path,
) -> Result<bool, RenderError> {
    backend.begin_figure(spec.width, spec.height);
    if let Some(text) = &spec.x_label {
        backend.set_x_label(text);
    }
    if let Some(text) = &spec.y_label {
        backend.set_y_label(text);
    }
    if let Some(text) = &spec.title {
        backend.set_title(text);
    }

    for series in &spec.series {
        match series {
            Series::Line { x, y, label, options } => {
                backend.draw_line(x, y, label.as_deref(), options)
            }
            Series::Scatter { x, y, label, options } => {
                backend.draw_scatter(x, y, label.as_deref(), options)
            }
            Series::ErrorBars { x, y, y_err, label, options } => {
                backend.draw_error_bars(x, y, y_err, label.as_deref(), options)
            }
        }
    }

    if spec.has_labeled_series() {
        backend.show_legend();
    }

    if !spec.wants_save() {
        return Ok(false);
    }

    let path = out_dir.join(&spec.save_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| RenderError::CreateDirs {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    backend.save_to(&path).map_err(|source| RenderError::Save {
        path: path.clone(),
        source,
    })?;
    Ok(true)
}
