//! quire: object serialization and font metrics for PDF generation.
//!
//! The workspace is split the same way the data flows:
//! - `quire-types`: object ids and their allocator, glyph boxes
//! - `quire-traits`: the `PdfObject` contract and metrics sources
//! - `quire-afm`: AFM parsing into per-variant metrics tables
//! - `quire-objects`: concrete objects and the offset-tracking writer
//!
//! This crate ties them together with a caching [`FontLibrary`].

pub mod error;
pub mod fonts;

pub use error::QuireError;
pub use fonts::{
    FontFamily, FontLibrary, FontLibraryConfig, FontStyle, StandardFont, load_metrics_file,
};

pub use quire_afm::{
    AfmLoader, FontVariantMetrics, GlyphMetrics, LoadOptions, MalformedLinePolicy, MetricsError,
    encode_latin1,
};
pub use quire_objects::{FontObject, IndirectObject, ObjectWriter, XrefEntry};
pub use quire_resource::{FilesystemMetricsSource, InMemoryMetricsSource};
pub use quire_traits::{GenerationError, MetricsSource, PdfObject};
pub use quire_types::{BoundingBox, IdAllocator, ObjectId};
