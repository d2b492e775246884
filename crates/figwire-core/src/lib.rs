// File: crates/figwire-core/src/lib.rs
// Summary: Core library entry point; exports the wire data model, codec, and render driver.

pub mod backend;
pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
pub mod render;
pub mod spec;

pub use backend::RenderBackend;
pub use decode::decode;
pub use encode::FigureWriter;
pub use error::{DecodeError, EncodeError, RenderError};
pub use options::{OptionSet, OptionValue};
pub use render::render;
pub use spec::{FigureSpec, Series};
