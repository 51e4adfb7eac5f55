pub mod object;
pub mod source;

pub use object::{CountingWriter, GenerationError, PdfObject};
pub use source::{InMemoryMetricsSource, MetricsReader, MetricsSource, SourceError};
