//! MetricsSource trait for abstracting where font metrics text comes from.
//!
//! The loader only needs a line-oriented reader. A source hands one out per
//! request, and the caller owns (and drops) it once loading finishes.

use std::collections::HashMap;
use std::fmt::Debug;
use std::io::{self, BufRead, Cursor};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for opening metrics descriptions.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Metrics resource not found: {0}")]
    NotFound(String),

    #[error("Failed to open metrics resource '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Metrics source lock poisoned while accessing '{0}'")]
    Poisoned(String),
}

/// A reader handed out by a [`MetricsSource`].
pub type MetricsReader = Box<dyn BufRead + Send>;

/// A named collection of font metrics descriptions.
///
/// # Implementations
///
/// - `InMemoryMetricsSource`: pre-populated text, available everywhere
/// - `FilesystemMetricsSource` (in `quire-resource`): files under a base directory
pub trait MetricsSource: Send + Sync + Debug {
    /// Opens the description registered under `name` (e.g. `"Helvetica.afm"`).
    ///
    /// Every call returns an independent reader positioned at the start.
    fn open(&self, name: &str) -> Result<MetricsReader, SourceError>;

    /// Whether `name` can be opened.
    fn exists(&self, name: &str) -> bool;

    /// A human-readable name for this source (for logging).
    fn name(&self) -> &'static str;
}

/// Metrics descriptions kept in memory.
#[derive(Debug, Default)]
pub struct InMemoryMetricsSource {
    entries: RwLock<HashMap<String, Arc<[u8]>>>,
}

impl InMemoryMetricsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `data` under `name`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Poisoned` if the internal lock is poisoned.
    pub fn add(&self, name: impl Into<String>, data: impl AsRef<[u8]>) -> Result<(), SourceError> {
        let name = name.into();
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SourceError::Poisoned(name.clone()))?;
        entries.insert(name, Arc::from(data.as_ref()));
        Ok(())
    }

    /// Builder-style variant of [`add`](Self::add).
    pub fn with(self, name: impl Into<String>, data: impl AsRef<[u8]>) -> Result<Self, SourceError> {
        self.add(name, data)?;
        Ok(self)
    }

    /// Number of registered descriptions. Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `Cursor` over a shared buffer, so readers never copy the description.
struct SharedCursor(Arc<[u8]>);

impl AsRef<[u8]> for SharedCursor {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl MetricsSource for InMemoryMetricsSource {
    fn open(&self, name: &str) -> Result<MetricsReader, SourceError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SourceError::Poisoned(name.to_string()))?;
        let data = entries
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(name.to_string()))?;
        Ok(Box::new(Cursor::new(SharedCursor(data))))
    }

    fn exists(&self, name: &str) -> bool {
        self.entries
            .read()
            .map(|e| e.contains_key(name))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryMetricsSource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_all(mut reader: MetricsReader) -> String {
        let mut text = String::new();
        reader.read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn test_in_memory_source_add_and_open() {
        let source = InMemoryMetricsSource::new();
        source.add("Test.afm", "FontName Test\n").unwrap();

        assert_eq!(read_all(source.open("Test.afm").unwrap()), "FontName Test\n");
    }

    #[test]
    fn test_in_memory_source_readers_are_independent() {
        let source = InMemoryMetricsSource::new()
            .with("Test.afm", "FontName Test\nUnderlinePosition -100\n")
            .unwrap();

        let mut first = source.open("Test.afm").unwrap();
        let mut line = String::new();
        first.read_line(&mut line).unwrap();
        assert_eq!(line, "FontName Test\n");

        let second = source.open("Test.afm").unwrap();
        assert!(read_all(second).starts_with("FontName Test"));
    }

    #[test]
    fn test_in_memory_source_not_found() {
        let source = InMemoryMetricsSource::new();
        let result = source.open("Missing.afm");
        assert!(matches!(result, Err(SourceError::NotFound(_))));
        assert!(!source.exists("Missing.afm"));
    }

    #[test]
    fn test_in_memory_source_overwrite() {
        let source = InMemoryMetricsSource::new();
        source.add("Test.afm", "FontName Old\n").unwrap();
        source.add("Test.afm", "FontName New\n").unwrap();

        assert_eq!(source.len(), 1);
        assert_eq!(read_all(source.open("Test.afm").unwrap()), "FontName New\n");
    }

    #[test]
    fn test_in_memory_source_empty() {
        let source = InMemoryMetricsSource::new();
        assert!(source.is_empty());
        assert_eq!(source.name(), "InMemoryMetricsSource");
    }

    #[test]
    fn test_source_error_display() {
        let err = SourceError::NotFound("Courier.afm".to_string());
        assert!(err.to_string().contains("Courier.afm"));

        let err = SourceError::Io {
            name: "Times-Bold.afm".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(err.to_string().contains("Times-Bold.afm"));
        assert!(err.to_string().contains("permission denied"));
    }
}
