// File: crates/figwire-core/src/decode.rs
// Summary: Tag-dispatched stream decoder for the binary figure format.

use std::io::{self, Read};

use crate::error::DecodeError;
use crate::options::{OptionSet, OptionValue};
use crate::spec::{FigureSpec, Series};

/// Decode one complete figure stream.
///
/// The stream must open with the mandatory header (`s` save path, then `D`
/// dimensions), may carry any number of `X`/`Y`/`T` label records, and ends
/// with zero or more plotting records (`P`/`S`/`E`/`O`/`R`). End of stream
/// is only legal at a tag boundary after the header; running out of bytes
/// inside a record payload is [`DecodeError::UnexpectedEnd`].
///
/// The decoder reads the source a few bytes at a time; wrap file sources in
/// a `BufReader`.
pub fn decode<R: Read>(reader: R) -> Result<FigureSpec, DecodeError> {
    Decoder::new(reader).run()
}

/// Decoding phase, advanced one tag record per step.
///
/// `Labels` hands its terminating tag over to `Plotting`: the byte has
/// already been consumed, so it is carried rather than pushed back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    SavePath,
    Dimensions,
    Labels,
    Plotting,
    Done,
}

struct Decoder<R: Read> {
    src: R,
    /// Bytes consumed so far; reported in errors.
    offset: u64,
    phase: Phase,
    spec: FigureSpec,
    /// Pending options, cloned into each series as it is emitted.
    options: OptionSet,
    /// Tag read by the labels loop that belongs to the plotting loop.
    carried: Option<u8>,
}

impl<R: Read> Decoder<R> {
    fn new(src: R) -> Self {
        Self {
            src,
            offset: 0,
            phase: Phase::SavePath,
            spec: FigureSpec::default(),
            options: OptionSet::new(),
            carried: None,
        }
    }

    fn run(mut self) -> Result<FigureSpec, DecodeError> {
        while self.phase != Phase::Done {
            self.step()?;
        }
        Ok(self.spec)
    }

    fn step(&mut self) -> Result<(), DecodeError> {
        match self.phase {
            Phase::SavePath => self.read_save_path(),
            Phase::Dimensions => self.read_dimensions(),
            Phase::Labels => self.read_label_record(),
            Phase::Plotting => self.read_plot_record(),
            Phase::Done => Ok(()),
        }
    }

    fn read_save_path(&mut self) -> Result<(), DecodeError> {
        match self.read_tag()? {
            Some(b's') => {}
            Some(found) => {
                return Err(DecodeError::UnexpectedTag {
                    expected: "save path ('s')",
                    found,
                    offset: self.offset - 1,
                })
            }
            None => {
                return Err(DecodeError::UnexpectedEnd {
                    what: "save path tag",
                    offset: self.offset,
                })
            }
        }
        self.spec.save_path = self.read_cstring("save path")?;
        self.phase = Phase::Dimensions;
        Ok(())
    }

    fn read_dimensions(&mut self) -> Result<(), DecodeError> {
        match self.read_tag()? {
            Some(b'D') => {}
            Some(found) => {
                return Err(DecodeError::UnexpectedTag {
                    expected: "dimensions ('D')",
                    found,
                    offset: self.offset - 1,
                })
            }
            None => {
                return Err(DecodeError::UnexpectedEnd {
                    what: "dimensions tag",
                    offset: self.offset,
                })
            }
        }
        self.spec.width = self.read_f64("figure width")?;
        self.spec.height = self.read_f64("figure height")?;
        self.phase = Phase::Labels;
        Ok(())
    }

    /// One `X`/`Y`/`T` record. Label tags may repeat; a non-empty payload
    /// overwrites, an empty one leaves any earlier value in place. The first
    /// tag that is not a label tag ends the phase for good.
    fn read_label_record(&mut self) -> Result<(), DecodeError> {
        let tag = match self.read_tag()? {
            None => {
                self.phase = Phase::Done;
                return Ok(());
            }
            Some(tag) => tag,
        };
        match tag {
            b'X' | b'Y' | b'T' => {
                let text = self.read_cstring("axis label or title")?;
                if !text.is_empty() {
                    let slot = match tag {
                        b'X' => &mut self.spec.x_label,
                        b'Y' => &mut self.spec.y_label,
                        _ => &mut self.spec.title,
                    };
                    *slot = Some(text);
                }
            }
            other => {
                self.carried = Some(other);
                self.phase = Phase::Plotting;
            }
        }
        Ok(())
    }

    fn read_plot_record(&mut self) -> Result<(), DecodeError> {
        let tag = match self.carried.take() {
            Some(tag) => tag,
            None => match self.read_tag()? {
                Some(tag) => tag,
                None => {
                    self.phase = Phase::Done;
                    return Ok(());
                }
            },
        };
        match tag {
            b'P' | b'S' => {
                let n = self.read_u64("series point count")?;
                let x = self.read_f64_array(n, "series x data")?;
                let y = self.read_f64_array(n, "series y data")?;
                let label = self.read_series_label()?;
                let options = self.options.clone();
                self.spec.series.push(if tag == b'P' {
                    Series::Line { x, y, label, options }
                } else {
                    Series::Scatter { x, y, label, options }
                });
            }
            b'E' => {
                let n = self.read_u64("series point count")?;
                let x = self.read_f64_array(n, "series x data")?;
                let y = self.read_f64_array(n, "series y data")?;
                let y_err = self.read_f64_array(n, "series y_err data")?;
                let label = self.read_series_label()?;
                let options = self.options.clone();
                self.spec.series.push(Series::ErrorBars { x, y, y_err, label, options });
            }
            b'O' => {
                let name = self.read_cstring("option name")?;
                let value = match self.read_tag()? {
                    Some(b'S') => OptionValue::Str(self.read_cstring("string option value")?),
                    Some(b'I') => OptionValue::Int(self.read_i32("integer option value")?),
                    Some(b'D') => OptionValue::Float(self.read_f64("float option value")?),
                    Some(tag) => {
                        return Err(DecodeError::UnknownOptionType {
                            name,
                            tag,
                            offset: self.offset - 1,
                        })
                    }
                    None => {
                        return Err(DecodeError::UnexpectedEnd {
                            what: "option type tag",
                            offset: self.offset,
                        })
                    }
                };
                self.options.set(name, value);
            }
            b'R' => self.options.clear(),
            other => {
                return Err(DecodeError::UnknownTag {
                    tag: other,
                    offset: self.offset - 1,
                })
            }
        }
        Ok(())
    }

    // ---- byte-level readers -------------------------------------------------

    /// Read the next tag byte. `Ok(None)` is clean end-of-stream.
    fn read_tag(&mut self) -> Result<Option<u8>, DecodeError> {
        let mut byte = [0u8; 1];
        loop {
            match self.src.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.offset += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(DecodeError::Io {
                        offset: self.offset,
                        source: e,
                    })
                }
            }
        }
    }

    fn read_exact(&mut self, buf: &mut [u8], what: &'static str) -> Result<(), DecodeError> {
        match self.src.read_exact(buf) {
            Ok(()) => {
                self.offset += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(DecodeError::UnexpectedEnd {
                what,
                offset: self.offset,
            }),
            Err(e) => Err(DecodeError::Io {
                offset: self.offset,
                source: e,
            }),
        }
    }

    fn read_u64(&mut self, what: &'static str) -> Result<u64, DecodeError> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf, what)?;
        Ok(u64::from_le_bytes(buf))
    }

    fn read_i32(&mut self, what: &'static str) -> Result<i32, DecodeError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf, what)?;
        Ok(i32::from_le_bytes(buf))
    }

    fn read_f64(&mut self, what: &'static str) -> Result<f64, DecodeError> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf, what)?;
        Ok(f64::from_le_bytes(buf))
    }

    fn read_f64_array(&mut self, n: u64, what: &'static str) -> Result<Vec<f64>, DecodeError> {
        // Cap the preallocation; a corrupt count should fail at read time,
        // not by exhausting memory up front.
        let mut out = Vec::with_capacity(n.min(1 << 16) as usize);
        for _ in 0..n {
            out.push(self.read_f64(what)?);
        }
        Ok(out)
    }

    /// Read a NUL-terminated UTF-8 string.
    fn read_cstring(&mut self, what: &'static str) -> Result<String, DecodeError> {
        let start = self.offset;
        let mut bytes = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match self.src.read(&mut byte) {
                Ok(0) => {
                    return Err(DecodeError::UnexpectedEnd {
                        what,
                        offset: self.offset,
                    })
                }
                Ok(_) => {
                    self.offset += 1;
                    if byte[0] == 0 {
                        break;
                    }
                    bytes.push(byte[0]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(DecodeError::Io {
                        offset: self.offset,
                        source: e,
                    })
                }
            }
        }
        String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 {
            what,
            offset: start,
        })
    }

    /// An empty wire label means "unlabeled".
    fn read_series_label(&mut self) -> Result<Option<String>, DecodeError> {
        let label = self.read_cstring("series label")?;
        Ok(if label.is_empty() { None } else { Some(label) })
    }
}
