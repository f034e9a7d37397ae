//! tmxio CLI - Command-line interface library
//!
//! This library provides the CLI functionality for tmxio, including:
//! - Inspect: Summarize a TMX file
//! - Dump: Print the decoded document as JSON
//! - Segments: List segment text per language
//!
//! # Library Usage
//!
//! ```ignore
//! use tmxio_cli::{load, segment_lines, Summary};
//!
//! let tmx = load(Path::new("memory.tmx"))?;
//! let summary = Summary::of(&tmx);
//! for line in segment_lines(&tmx, Some("de")) {
//!     println!("{line}");
//! }
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Summarize a translation memory
//! tmxio inspect memory.tmx --format json
//!
//! # Dump the full document
//! tmxio dump memory.tmx
//!
//! # German segments only, with debug logging
//! tmxio -vv segments memory.tmx --lang de
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{dump_command, inspect_command, segments_command};
pub use app::{dump_json, load, render_summary, run_cli, segment_lines, OutputFormat, Summary};
