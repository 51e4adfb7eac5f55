//! Adobe Font Metrics (AFM) loading.
//!
//! Turns the text of an `.afm` file into a [`FontVariantMetrics`] table that
//! text layout can query for advance widths, glyph boxes and kerning.
//!
//! ```
//! let afm = "FontName Demo\nC 65 ; WX 600 ; N A ; B 10 0 590 700 ;\n";
//! let metrics = quire_afm::load(afm.as_bytes()).unwrap();
//! assert_eq!(metrics.width_of(b'A'), 600);
//! ```
//!
//! Only `FontName`, `UnderlinePosition`, `UnderlineThickness`, `C` and `KPX`
//! lines are read. Glyphs without a code (`C -1`) are not indexed, and
//! kerning pairs that name such glyphs are dropped.
//!
//! Codes `0..=255` are all real positions, `255` included. Older loaders
//! that narrow the code to a signed byte read `C 255` as unencoded and wrap
//! larger codes; this crate intentionally does not, and rejects codes
//! outside `-1..=255` as malformed instead.

mod builder;
mod config;
mod error;
mod loader;
mod metrics;
pub mod tokenizer;

pub use builder::MetricsBuilder;
pub use config::{LoadOptions, MalformedLinePolicy};
pub use error::{LineError, MetricsError};
pub use loader::{AfmLoader, load};
pub use metrics::{FontVariantMetrics, GlyphMetrics, UNITS_PER_EM, encode_latin1};
