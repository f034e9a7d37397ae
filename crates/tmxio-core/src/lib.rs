//! # tmxio-core
//!
//! Typed model and decoder for TMX (Translation Memory eXchange) documents.
//!
//! This crate provides:
//! - A value model of the TMX element tree ([`Tmx`], [`Header`], [`Tu`], [`Tuv`], ...)
//! - [`read`] to load a `.tmx` file into that model
//!
//! ## Example: Reading a Translation Memory
//!
//! ```no_run
//! use tmxio_core::read;
//!
//! let tmx = read("memory.tmx")?;
//! println!("source language: {:?}", tmx.header.src_lang);
//!
//! for tu in &tmx.body.units {
//!     for tuv in &tu.variants {
//!         println!("{:?}: {}", tuv.lang, tuv.seg.text());
//!     }
//! }
//! # Ok::<(), tmxio_core::TmxError>(())
//! ```
//!
//! Attributes are `Option<String>`: `None` when the attribute is not in the
//! source, `Some("")` when it is present but empty. Markup the model does not
//! cover, including inline codes inside `<seg>`, is skipped.

pub mod error;
pub mod model;
pub mod reader;
mod schema;
mod tree;

pub use error::{DecodeError, Result, TmxError};
pub use model::{Body, Header, Inline, Map, Note, Prop, Seg, Tmx, Tu, Tuv, Ude};
pub use reader::read;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
