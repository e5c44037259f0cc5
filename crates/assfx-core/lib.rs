//! # assfx-core
//!
//! Parsing and text-segmentation engine for ASS (Advanced SubStation Alpha)
//! subtitle scripts, built for karaoke and typesetting effect generation.
//!
//! A script parses into a [`Ass`] holding the [`Meta`] header data, the
//! style table and every event as a [`Line`]. Each line is decomposed into
//! [`Word`]s, karaoke [`Syllable`]s and [`Char`]s, each carrying timing and
//! geometry, so effect code can address any granularity directly.
//!
//! ## Quick start
//!
//! ```
//! use assfx_core::{Ass, MonospaceMetrics, ParseOptions};
//!
//! let source = "\
//! [Script Info]
//! PlayResX: 1280
//! PlayResY: 720
//!
//! [Events]
//! Dialogue: 0,0:00:00.00,0:00:01.50,Default,,0,0,0,,{\\k50}Hel{\\k50}lo {\\k50}world!
//! ";
//!
//! let ass = Ass::parse(source, &MonospaceMetrics::default(), &ParseOptions::default())?;
//! for syl in &ass.lines[0].syls {
//!     println!("{} [{}..{}]", syl.text, syl.start_time, syl.end_time);
//! }
//! # Ok::<(), assfx_core::ParseError>(())
//! ```
//!
//! ## Design notes
//!
//! - Recoverable input problems (unknown styles, malformed override blocks,
//!   short rows) become [`ParseWarning`]s on the script, never errors.
//! - Font measurement goes through the [`FontMetrics`] trait; the crate
//!   performs no I/O and holds no global state, so concurrent parses share
//!   nothing.
//! - Geometry fields are `f64` and stay `NaN` until resolved.

pub mod karaoke;
mod layout;
pub mod metrics;
pub mod model;
mod parser;
mod script;
pub mod timestamps;
pub mod tokenizer;
pub mod utils;

pub use metrics::{FontMetrics, MonospaceMetrics, NullMetrics, TextExtents, VerticalMetrics};
pub use model::{Char, Line, Meta, Style, Syllable, Word, LEAD_SENTINEL};
pub use script::{Ass, ParseOptions};
pub use utils::errors::{ParseError, ParseWarning};

/// Crate version, for callers that surface it in generated scripts.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
