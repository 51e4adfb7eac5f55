//! Identifiers for indirect objects in a document.
//!
//! An [`ObjectId`] is handed out once by an [`IdAllocator`] and then carried,
//! unchanged, by the object it names. Ids are never reused within one
//! document, even if the object they were given to is never written.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use thiserror::Error;

/// Largest object number a conforming reader is required to handle.
pub const MAX_OBJECT_NUMBER: u32 = 8_388_607;

/// The number of an indirect object. Always positive.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(NonZeroU32);

impl ObjectId {
    /// Creates an id from a raw object number, rejecting zero.
    pub fn new(number: u32) -> Option<Self> {
        NonZeroU32::new(number).map(Self)
    }

    /// Returns the raw object number.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The generation number. Objects written by this library are never
    /// updated incrementally, so it is always zero.
    pub fn generation(self) -> u16 {
        0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.get(), self.generation())
    }
}

impl From<ObjectId> for u32 {
    fn from(id: ObjectId) -> Self {
        id.get()
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("object id space exhausted after {last} ids")]
pub struct IdSpaceExhausted {
    pub last: u32,
}

/// Hands out strictly increasing object ids, starting at 1.
///
/// The allocator belongs to a single document. Allocation is the only
/// operation that advances it; there is no way to give an id back. It is
/// deliberately not `Clone`: a copy would hand out the same ids again.
///
/// ```compile_fail
/// let ids = quire_types::IdAllocator::new();
/// let fork = ids.clone();
/// ```
#[derive(Debug)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocates the next id.
    ///
    /// # Errors
    ///
    /// Returns [`IdSpaceExhausted`] once [`MAX_OBJECT_NUMBER`] ids have been
    /// handed out. The allocator stays exhausted afterwards.
    pub fn allocate(&mut self) -> Result<ObjectId, IdSpaceExhausted> {
        if self.next > MAX_OBJECT_NUMBER {
            return Err(IdSpaceExhausted { last: MAX_OBJECT_NUMBER });
        }
        let id = ObjectId::new(self.next).ok_or(IdSpaceExhausted { last: 0 })?;
        self.next += 1;
        Ok(id)
    }

    /// Number of ids allocated so far.
    pub fn allocated(&self) -> u32 {
        self.next - 1
    }

    /// The highest id handed out, if any.
    pub fn last(&self) -> Option<ObjectId> {
        ObjectId::new(self.next - 1)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
