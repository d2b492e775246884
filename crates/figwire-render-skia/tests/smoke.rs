// File: crates/figwire-render-skia/tests/smoke.rs
// Purpose: End-to-end decode + render smoke test writing a PNG.

use figwire_core::{decode, render, FigureWriter};
use figwire_render_skia::SkiaBackend;

fn sample_stream(save_path: &str) -> Vec<u8> {
    let x: Vec<f64> = (0..50).map(|i| i as f64 * 0.2).collect();
    let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
    let y2: Vec<f64> = x.iter().map(|v| (v * 0.5).cos()).collect();

    let mut fig = FigureWriter::new(6.4, 4.8, "unused");
    fig.set_x_label("t");
    fig.set_y_label("amplitude");
    fig.set_title("smoke");
    fig.add_option("color", "#40a0ff").unwrap();
    fig.add_option("linewidth", 2).unwrap();
    fig.plot(&x, &y, "sine").unwrap();
    fig.reset_options();
    fig.scatter(&x, &y2, "cosine").unwrap();
    fig.error_bars(&[1.0, 3.0, 5.0], &[0.0, 0.5, -0.5], &[0.1, 0.1, 0.1], "err").unwrap();
    fig.to_bytes(save_path).unwrap()
}

#[test]
fn render_smoke_png() {
    let spec = decode(sample_stream("smoke.png").as_slice()).expect("well-formed stream");

    let out_dir = std::path::PathBuf::from("target/test_out");
    let mut backend = SkiaBackend::new();
    let saved = render(&spec, &mut backend, &out_dir).expect("render should succeed");
    assert!(saved, "stream carries a save path");

    let out = out_dir.join("smoke.png");
    let data = std::fs::read(&out).expect("output exists");
    assert!(data.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let img = image::load_from_memory(&data).expect("decodable PNG");
    // 6.4 x 4.8 figure units at 100 dots per unit.
    assert_eq!((img.width(), img.height()), (640, 480));

    // Also verify the in-memory API works
    let bytes = backend.render_to_png_bytes().expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn decode_only_stream_saves_nothing() {
    let spec = decode(sample_stream("").as_slice()).unwrap();

    let mut backend = SkiaBackend::new();
    let saved = render(&spec, &mut backend, std::path::Path::new("target/test_out")).unwrap();
    assert!(!saved);
}
