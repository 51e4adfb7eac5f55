//! The serialization contract shared by every object in a document.
//!
//! A writer that builds the cross-reference table never inspects the sink
//! it writes to. It relies entirely on the byte count each object reports
//! from [`PdfObject::write`], so that count has to be exact.

use quire_types::{IdSpaceExhausted, ObjectId};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("object {id} cannot be written: {resource} was never attached")]
    MissingResource { id: ObjectId, resource: &'static str },

    #[error("object {id} reported {reported} bytes but wrote {actual}")]
    LengthMismatch {
        id: ObjectId,
        reported: usize,
        actual: u64,
    },

    #[error("object {0} was already written to this document")]
    DuplicateObject(ObjectId),

    #[error(transparent)]
    IdSpaceExhausted(#[from] IdSpaceExhausted),
}

/// An object that can be written into a document and referenced by id.
///
/// Implementations must treat `write` as a pure function of their state:
/// two calls on an unchanged object produce identical bytes, and the
/// returned count is the number of bytes handed to `sink` in that call.
pub trait PdfObject {
    /// The id this object was registered under. Never changes.
    fn id(&self) -> ObjectId;

    /// Appends the full representation of this object to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Io`] if the sink rejects a write, or
    /// [`GenerationError::MissingResource`] if the object is incomplete.
    fn write(&self, sink: &mut dyn Write) -> Result<usize, GenerationError>;
}

impl<T: PdfObject + ?Sized> PdfObject for &T {
    fn id(&self) -> ObjectId {
        (**self).id()
    }

    fn write(&self, sink: &mut dyn Write) -> Result<usize, GenerationError> {
        (**self).write(sink)
    }
}

impl<T: PdfObject + ?Sized> PdfObject for Box<T> {
    fn id(&self) -> ObjectId {
        (**self).id()
    }

    fn write(&self, sink: &mut dyn Write) -> Result<usize, GenerationError> {
        (**self).write(sink)
    }
}

/// A pass-through writer that counts the bytes accepted by the inner sink.
///
/// Only bytes the inner writer actually accepted are counted, so a short
/// write is never over-reported.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }

    /// Bytes written through this wrapper so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
