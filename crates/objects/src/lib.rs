//! Concrete document objects and the writer that lays them out.
//!
//! This crate provides:
//! - [`IndirectObject`] and [`FontObject`], implementations of `PdfObject`
//! - [`ObjectWriter`], which writes objects to a forward-only sink and
//!   builds the cross-reference section from their reported lengths
//! - the byte-level serializer for `lopdf` object bodies

mod object;
pub mod serialize;
mod writer;

pub use object::{FontObject, IndirectObject};
pub use serialize::reference;
pub use writer::{ObjectWriter, XrefEntry};

pub use quire_traits::{GenerationError, PdfObject};
