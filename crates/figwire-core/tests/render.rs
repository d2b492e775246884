// File: crates/figwire-core/tests/render.rs
// Purpose: Render driver behavior against a recording backend.

use std::io;
use std::path::{Path, PathBuf};

use figwire_core::{decode, render, FigureSpec, OptionSet, RenderBackend, RenderError, Series};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    BeginFigure(f64, f64),
    SetXLabel(String),
    SetYLabel(String),
    SetTitle(String),
    DrawLine { points: usize, label: Option<String>, options: OptionSet },
    DrawScatter { points: usize, label: Option<String>, options: OptionSet },
    DrawErrorBars { points: usize, label: Option<String>, options: OptionSet },
    ShowLegend,
    SaveTo(PathBuf),
}

#[derive(Default)]
struct RecordingBackend {
    calls: Vec<Call>,
    fail_save: bool,
}

impl RenderBackend for RecordingBackend {
    fn begin_figure(&mut self, width: f64, height: f64) {
        self.calls.push(Call::BeginFigure(width, height));
    }

    fn set_x_label(&mut self, text: &str) {
        self.calls.push(Call::SetXLabel(text.to_string()));
    }

    fn set_y_label(&mut self, text: &str) {
        self.calls.push(Call::SetYLabel(text.to_string()));
    }

    fn set_title(&mut self, text: &str) {
        self.calls.push(Call::SetTitle(text.to_string()));
    }

    fn draw_line(&mut self, x: &[f64], _y: &[f64], label: Option<&str>, options: &OptionSet) {
        self.calls.push(Call::DrawLine {
            points: x.len(),
            label: label.map(str::to_string),
            options: options.clone(),
        });
    }

    fn draw_scatter(&mut self, x: &[f64], _y: &[f64], label: Option<&str>, options: &OptionSet) {
        self.calls.push(Call::DrawScatter {
            points: x.len(),
            label: label.map(str::to_string),
            options: options.clone(),
        });
    }

    fn draw_error_bars(
        &mut self,
        x: &[f64],
        _y: &[f64],
        _y_err: &[f64],
        label: Option<&str>,
        options: &OptionSet,
    ) {
        self.calls.push(Call::DrawErrorBars {
            points: x.len(),
            label: label.map(str::to_string),
            options: options.clone(),
        });
    }

    fn show_legend(&mut self) {
        self.calls.push(Call::ShowLegend);
    }

    fn save_to(&mut self, path: &Path) -> io::Result<()> {
        self.calls.push(Call::SaveTo(path.to_path_buf()));
        if self.fail_save {
            Err(io::Error::other("backend refused"))
        } else {
            Ok(())
        }
    }
}

fn line(x: Vec<f64>, y: Vec<f64>, label: Option<&str>) -> Series {
    Series::Line {
        x,
        y,
        label: label.map(str::to_string),
        options: OptionSet::new(),
    }
}

#[test]
fn decoded_stream_drives_backend_in_order() {
    // The reference scenario: s "out/plot.png", D (4,3), P n=3, label "sq".
    let mut stream = vec![b's'];
    stream.extend(b"out/plot.png\0");
    stream.push(b'D');
    stream.extend(4.0f64.to_le_bytes());
    stream.extend(3.0f64.to_le_bytes());
    stream.push(b'P');
    stream.extend(3u64.to_le_bytes());
    for v in [0.0f64, 1.0, 2.0, 0.0, 1.0, 4.0] {
        stream.extend(v.to_le_bytes());
    }
    stream.extend(b"sq\0");

    let spec = decode(stream.as_slice()).unwrap();
    let mut backend = RecordingBackend::default();
    let out_dir = PathBuf::from("target/test_out/render");
    let saved = render(&spec, &mut backend, &out_dir).unwrap();

    assert!(saved);
    assert_eq!(
        backend.calls,
        vec![
            Call::BeginFigure(4.0, 3.0),
            Call::DrawLine {
                points: 3,
                label: Some("sq".to_string()),
                options: OptionSet::new(),
            },
            Call::ShowLegend,
            Call::SaveTo(out_dir.join("out/plot.png")),
        ]
    );
    // The driver created the save path's parent directories.
    assert!(out_dir.join("out").is_dir());
}

#[test]
fn labels_applied_before_series() {
    let spec = FigureSpec {
        save_path: String::new(),
        width: 2.0,
        height: 2.0,
        x_label: Some("t".to_string()),
        y_label: Some("v".to_string()),
        title: Some("demo".to_string()),
        series: vec![line(vec![0.0], vec![1.0], None)],
    };

    let mut backend = RecordingBackend::default();
    render(&spec, &mut backend, Path::new("target/test_out/render")).unwrap();

    assert_eq!(
        backend.calls,
        vec![
            Call::BeginFigure(2.0, 2.0),
            Call::SetXLabel("t".to_string()),
            Call::SetYLabel("v".to_string()),
            Call::SetTitle("demo".to_string()),
            Call::DrawLine { points: 1, label: None, options: OptionSet::new() },
        ]
    );
}

#[test]
fn legend_only_when_some_series_is_labeled() {
    let mut spec = FigureSpec {
        save_path: String::new(),
        width: 1.0,
        height: 1.0,
        x_label: None,
        y_label: None,
        title: None,
        series: vec![line(vec![0.0], vec![0.0], None)],
    };

    let mut backend = RecordingBackend::default();
    render(&spec, &mut backend, Path::new("target/test_out/render")).unwrap();
    assert!(!backend.calls.contains(&Call::ShowLegend));

    spec.series.push(line(vec![0.0], vec![0.0], Some("named")));
    let mut backend = RecordingBackend::default();
    render(&spec, &mut backend, Path::new("target/test_out/render")).unwrap();
    assert!(backend.calls.contains(&Call::ShowLegend));
}

#[test]
fn empty_save_path_renders_but_saves_nothing() {
    let spec = FigureSpec {
        save_path: String::new(),
        width: 1.0,
        height: 1.0,
        x_label: None,
        y_label: None,
        title: None,
        series: vec![line(vec![0.0, 1.0], vec![1.0, 0.0], Some("s"))],
    };

    let mut backend = RecordingBackend::default();
    let saved = render(&spec, &mut backend, Path::new("target/test_out/render")).unwrap();

    assert!(!saved);
    assert!(!backend.calls.iter().any(|c| matches!(c, Call::SaveTo(_))));
}

#[test]
fn captured_options_reach_the_backend() {
    let mut options = OptionSet::new();
    options.set("color", "red");
    let spec = FigureSpec {
        save_path: String::new(),
        width: 1.0,
        height: 1.0,
        x_label: None,
        y_label: None,
        title: None,
        series: vec![Series::Scatter {
            x: vec![0.0],
            y: vec![0.0],
            label: None,
            options: options.clone(),
        }],
    };

    let mut backend = RecordingBackend::default();
    render(&spec, &mut backend, Path::new("target/test_out/render")).unwrap();

    assert_eq!(
        backend.calls[1],
        Call::DrawScatter { points: 1, label: None, options }
    );
}

#[test]
fn backend_save_failure_surfaces_as_render_error() {
    let spec = FigureSpec {
        save_path: "fail.png".to_string(),
        width: 1.0,
        height: 1.0,
        x_label: None,
        y_label: None,
        title: None,
        series: Vec::new(),
    };

    let mut backend = RecordingBackend { fail_save: true, ..Default::default() };
    let err = render(&spec, &mut backend, Path::new("target/test_out/render")).unwrap_err();

    match err {
        RenderError::Save { path, .. } => {
            assert_eq!(path, Path::new("target/test_out/render/fail.png"));
        }
        other => panic!("got {other:?}"),
    }
}
