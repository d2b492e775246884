// File: crates/demo/src/main.rs
// Summary: Demo decodes figure wire files (.img) and renders each to a PNG.

use anyhow::{Context, Result};
use figwire_core::{decode, render, FigureSpec};
use figwire_render_skia::{theme, SkiaBackend};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let mut inputs: Vec<PathBuf> = Vec::new();
    let mut out_dir = PathBuf::from("target/out");
    let mut theme = theme::Theme::dark();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--out-dir" {
            out_dir = PathBuf::from(args.next().context("--out-dir needs a directory")?);
        } else if arg == "--theme" {
            theme = theme::find(&args.next().context("--theme needs a name")?);
        } else {
            inputs.push(PathBuf::from(arg));
        }
    }
    if inputs.is_empty() {
        anyhow::bail!("usage: figwire-demo [--out-dir DIR] [--theme NAME] <figure.img>...");
    }

    for input in &inputs {
        if !input.exists() {
            anyhow::bail!("file not found: {}", input.display());
        }
        println!("Using input file: {}", input.display());

        let spec = load_spec(input)
            .with_context(|| format!("failed to decode '{}'", input.display()))?;
        println!(
            "Decoded figure: {}x{} units, {} series",
            spec.width,
            spec.height,
            spec.series.len()
        );

        let mut backend = SkiaBackend::with_theme(theme);
        let saved = render(&spec, &mut backend, &out_dir)
            .with_context(|| format!("failed to render '{}'", input.display()))?;
        if saved {
            println!("Wrote {}", out_dir.join(&spec.save_path).display());
        } else {
            println!("  (figure requested no save; skipped)");
        }
    }

    Ok(())
}

fn load_spec(path: &Path) -> Result<FigureSpec> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let spec = decode(BufReader::new(file))?;
    Ok(spec)
}
