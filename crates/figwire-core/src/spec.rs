// File: crates/figwire-core/src/spec.rs
// Summary: Decoded figure model: header fields plus an ordered list of series.

use crate::options::OptionSet;

/// One plotted dataset with its label and the options captured at the moment
/// the series was emitted.
///
/// `x`, `y` (and `y_err`) always have the same length; the decoder reads a
/// single length prefix per series and sizes every array from it.
#[derive(Clone, Debug, PartialEq)]
pub enum Series {
    Line {
        x: Vec<f64>,
        y: Vec<f64>,
        label: Option<String>,
        options: OptionSet,
    },
    Scatter {
        x: Vec<f64>,
        y: Vec<f64>,
        label: Option<String>,
        options: OptionSet,
    },
    ErrorBars {
        x: Vec<f64>,
        y: Vec<f64>,
        y_err: Vec<f64>,
        label: Option<String>,
        options: OptionSet,
    },
}

impl Series {
    pub fn label(&self) -> Option<&str> {
        match self {
            Series::Line { label, .. }
            | Series::Scatter { label, .. }
            | Series::ErrorBars { label, .. } => label.as_deref(),
        }
    }

    pub fn options(&self) -> &OptionSet {
        match self {
            Series::Line { options, .. }
            | Series::Scatter { options, .. }
            | Series::ErrorBars { options, .. } => options,
        }
    }

    /// Number of points in the series.
    pub fn len(&self) -> usize {
        match self {
            Series::Line { x, .. } | Series::Scatter { x, .. } | Series::ErrorBars { x, .. } => {
                x.len()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A fully decoded figure, ready to hand to the render driver.
///
/// Immutable by convention once the decoder returns it: the decoder is the
/// only writer, and the driver only reads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FigureSpec {
    /// Output path relative to the renderer's output directory. Empty means
    /// "decode only, do not save".
    pub save_path: String,
    /// Figure dimensions in producer units (mandatory header fields).
    pub width: f64,
    pub height: f64,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub title: Option<String>,
    /// Series in stream order; render order is insertion order.
    pub series: Vec<Series>,
}

impl FigureSpec {
    /// Whether at least one series carries a label. Controls the legend.
    pub fn has_labeled_series(&self) -> bool {
        self.series.iter().any(|s| s.label().is_some())
    }

    /// Whether the producer asked for the figure to be saved.
    pub fn wants_save(&self) -> bool {
        !self.save_path.is_empty()
    }
}
