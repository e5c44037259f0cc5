//! Object model produced by parsing: script metadata, styles and the
//! line/word/syllable/char hierarchy.

pub mod line;
pub mod meta;
pub mod style;

pub use self::line::{Char, Line, Syllable, Word, LEAD_SENTINEL};
pub use self::meta::Meta;
pub use self::style::Style;
