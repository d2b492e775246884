// File: crates/figwire-core/src/encode.rs
// Summary: Producer side of the wire format; serializes figures to .img data files.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::EncodeError;
use crate::options::OptionValue;

/// Builds a figure and serializes it to the tagged binary stream the decoder
/// reads back.
///
/// Series and option records accumulate in a body buffer in call order; the
/// header (save path, dimensions, any non-empty labels) is emitted in front
/// of the body when the stream is written out. Options apply to every series
/// emitted after them until replaced or [`reset_options`](Self::reset_options).
pub struct FigureWriter {
    width: f64,
    height: f64,
    write_dir: PathBuf,
    x_label: String,
    y_label: String,
    title: String,
    body: Vec<u8>,
}

impl FigureWriter {
    /// New figure with the given dimensions (producer units) and the
    /// directory data files are written under.
    pub fn new(width: f64, height: f64, write_dir: impl Into<PathBuf>) -> Self {
        Self {
            width,
            height,
            write_dir: write_dir.into(),
            x_label: String::new(),
            y_label: String::new(),
            title: String::new(),
            body: Vec::new(),
        }
    }

    pub fn set_x_label(&mut self, label: impl Into<String>) {
        self.x_label = label.into();
    }

    pub fn set_y_label(&mut self, label: impl Into<String>) {
        self.y_label = label.into();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Append a line series. Pass an empty label for an unlabeled series.
    pub fn plot(&mut self, x: &[f64], y: &[f64], label: &str) -> Result<(), EncodeError> {
        self.xy_record(b'P', x, y, label)
    }

    /// Append a scatter series.
    pub fn scatter(&mut self, x: &[f64], y: &[f64], label: &str) -> Result<(), EncodeError> {
        self.xy_record(b'S', x, y, label)
    }

    /// Append an error-bar series; `y_err` gives the symmetric error per point.
    pub fn error_bars(
        &mut self,
        x: &[f64],
        y: &[f64],
        y_err: &[f64],
        label: &str,
    ) -> Result<(), EncodeError> {
        if x.len() != y.len() {
            return Err(EncodeError::LengthMismatch { x: x.len(), y: y.len() });
        }
        if y_err.len() != x.len() {
            return Err(EncodeError::ErrLengthMismatch {
                data: x.len(),
                y_err: y_err.len(),
            });
        }
        check_no_nul(label, "series label")?;
        self.body.push(b'E');
        self.push_u64(x.len() as u64);
        self.push_f64s(x);
        self.push_f64s(y);
        self.push_f64s(y_err);
        self.push_cstring(label);
        Ok(())
    }

    /// Set a named option for every series emitted after this call. A
    /// repeated name replaces the earlier value.
    pub fn add_option(
        &mut self,
        name: &str,
        value: impl Into<OptionValue>,
    ) -> Result<(), EncodeError> {
        check_no_nul(name, "option name")?;
        let value = value.into();
        if let OptionValue::Str(s) = &value {
            check_no_nul(s, "option value")?;
        }
        self.body.push(b'O');
        self.push_cstring(name);
        match value {
            OptionValue::Str(s) => {
                self.body.push(b'S');
                self.push_cstring(&s);
            }
            OptionValue::Int(i) => {
                self.body.push(b'I');
                self.body.extend_from_slice(&i.to_le_bytes());
            }
            OptionValue::Float(f) => {
                self.body.push(b'D');
                self.body.extend_from_slice(&f.to_le_bytes());
            }
        }
        Ok(())
    }

    /// Drop all pending options.
    pub fn reset_options(&mut self) {
        self.body.push(b'R');
    }

    /// Emit the complete stream: header, any non-empty labels, then the
    /// accumulated plotting records.
    pub fn write_to<W: Write>(&self, mut writer: W, save_path: &str) -> Result<(), EncodeError> {
        check_no_nul(save_path, "save path")?;
        writer.write_all(&[b's'])?;
        writer.write_all(save_path.as_bytes())?;
        writer.write_all(&[0])?;
        writer.write_all(&[b'D'])?;
        writer.write_all(&self.width.to_le_bytes())?;
        writer.write_all(&self.height.to_le_bytes())?;
        for (tag, text) in [(b'X', &self.x_label), (b'Y', &self.y_label), (b'T', &self.title)] {
            if text.is_empty() {
                continue;
            }
            check_no_nul(text, "axis label or title")?;
            writer.write_all(&[tag])?;
            writer.write_all(text.as_bytes())?;
            writer.write_all(&[0])?;
        }
        writer.write_all(&self.body)?;
        Ok(())
    }

    /// The full stream as bytes.
    pub fn to_bytes(&self, save_path: &str) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::with_capacity(self.body.len() + 64);
        self.write_to(&mut out, save_path)?;
        Ok(out)
    }

    /// Write the figure's data file under the write directory and return its
    /// path. The file name is derived from `save_path` by replacing every
    /// `.` with `_` and appending `.img`; the consumer will save the decoded
    /// image at `save_path` relative to its own output directory.
    pub fn save(&self, save_path: &str) -> Result<PathBuf, EncodeError> {
        let mut data_file_name = save_path.replace('.', "_");
        data_file_name.push_str(".img");
        let path = self.write_dir.join(data_file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = io::BufWriter::new(fs::File::create(&path)?);
        self.write_to(&mut file, save_path)?;
        file.flush()?;
        Ok(path)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn write_dir(&self) -> &Path {
        &self.write_dir
    }

    // ---- body building ------------------------------------------------------

    fn xy_record(&mut self, tag: u8, x: &[f64], y: &[f64], label: &str) -> Result<(), EncodeError> {
        if x.len() != y.len() {
            return Err(EncodeError::LengthMismatch { x: x.len(), y: y.len() });
        }
        check_no_nul(label, "series label")?;
        self.body.push(tag);
        self.push_u64(x.len() as u64);
        self.push_f64s(x);
        self.push_f64s(y);
        self.push_cstring(label);
        Ok(())
    }

    fn push_u64(&mut self, value: u64) {
        self.body.extend_from_slice(&value.to_le_bytes());
    }

    fn push_f64s(&mut self, values: &[f64]) {
        for v in values {
            self.body.extend_from_slice(&v.to_le_bytes());
        }
    }

    fn push_cstring(&mut self, s: &str) {
        self.body.extend_from_slice(s.as_bytes());
        self.body.push(0);
    }
}

fn check_no_nul(s: &str, what: &'static str) -> Result<(), EncodeError> {
    if s.contains('\0') {
        Err(EncodeError::InteriorNul { what })
    } else {
        Ok(())
    }
}
