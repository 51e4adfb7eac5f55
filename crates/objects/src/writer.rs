//! Forward-only document writer that records where each object landed.
//!
//! The writer never seeks. Offsets are derived from the bytes that passed
//! through it, and every object's self-reported length is checked against
//! that count before its cross-reference entry is recorded.

use quire_traits::{CountingWriter, GenerationError, PdfObject};
use quire_types::ObjectId;
use std::collections::BTreeMap;
use std::io::Write;

/// Where one object starts in the output and how long it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrefEntry {
    pub id: ObjectId,
    pub offset: u64,
    pub length: usize,
}

pub struct ObjectWriter<W: Write> {
    sink: CountingWriter<W>,
    entries: BTreeMap<ObjectId, XrefEntry>,
}

impl<W: Write> ObjectWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: CountingWriter::new(sink),
            entries: BTreeMap::new(),
        }
    }

    /// Writes the file header: the version line and a binary marker comment.
    pub fn write_header(&mut self, version: &str) -> Result<u64, GenerationError> {
        let start = self.offset();
        writeln!(self.sink, "%PDF-{}", version)?;
        self.sink.write_all(b"%\xE2\xE3\xCF\xD3\n")?;
        Ok(self.offset() - start)
    }

    /// Bytes written so far; the offset the next object will start at.
    pub fn offset(&self) -> u64 {
        self.sink.count()
    }

    /// Writes `object` and records its cross-reference entry.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::DuplicateObject`] if the id was already written.
    /// - [`GenerationError::LengthMismatch`] if the object reported a length
    ///   different from what reached the sink. The output is unusable after
    ///   this and the document should be abandoned.
    /// - Anything the object's own `write` returns.
    pub fn write_object(&mut self, object: &dyn PdfObject) -> Result<XrefEntry, GenerationError> {
        let id = object.id();
        if self.entries.contains_key(&id) {
            return Err(GenerationError::DuplicateObject(id));
        }

        let offset = self.offset();
        let reported = object.write(&mut self.sink)?;
        let actual = self.offset() - offset;
        if actual != reported as u64 {
            return Err(GenerationError::LengthMismatch {
                id,
                reported,
                actual,
            });
        }

        let entry = XrefEntry {
            id,
            offset,
            length: reported,
        };
        log::debug!("Wrote object {} at offset {} ({} bytes)", id, offset, reported);
        self.entries.insert(id, entry);
        Ok(entry)
    }

    pub fn entry(&self, id: ObjectId) -> Option<&XrefEntry> {
        self.entries.get(&id)
    }

    /// Recorded entries in id order.
    pub fn entries(&self) -> impl Iterator<Item = &XrefEntry> {
        self.entries.values()
    }

    /// Writes a cross-reference section covering every object written so
    /// far and returns its starting offset (the `startxref` value).
    ///
    /// Object 0 is always the head of the free list. Ids that were never
    /// written are left out; each run of consecutive ids gets its own
    /// subsection.
    pub fn write_xref(&mut self) -> Result<u64, GenerationError> {
        let xref_start = self.offset();
        let sections = xref_sections(self.entries.values());

        writeln!(self.sink, "xref")?;
        for (start, rows) in &sections {
            writeln!(self.sink, "{} {}", start, rows.len())?;
            for row in rows {
                match row {
                    Some(offset) => writeln!(self.sink, "{:010} {:05} n ", offset, 0)?,
                    None => writeln!(self.sink, "{:010} {:05} f ", 0, 65535)?,
                }
            }
        }
        log::debug!(
            "Wrote xref at offset {} ({} objects, {} subsections)",
            xref_start,
            self.entries.len(),
            sections.len()
        );
        Ok(xref_start)
    }

    /// Flushes the sink and hands it back with the recorded entries.
    pub fn finish(mut self) -> Result<(W, Vec<XrefEntry>), GenerationError> {
        self.sink.flush()?;
        let entries = self.entries.into_values().collect();
        Ok((self.sink.into_inner(), entries))
    }
}

/// Groups entries into `(first id, rows)` runs. A row is `None` for the free
/// object 0 and `Some(offset)` for a written object.
fn xref_sections<'a>(
    entries: impl Iterator<Item = &'a XrefEntry>,
) -> Vec<(u32, Vec<Option<u64>>)> {
    let mut sections: Vec<(u32, Vec<Option<u64>>)> = vec![(0, vec![None])];
    for entry in entries {
        let number = entry.id.get();
        match sections.last_mut() {
            Some((start, rows)) if *start + rows.len() as u32 == number => {
                rows.push(Some(entry.offset));
            }
            _ => sections.push((number, vec![Some(entry.offset)])),
        }
    }
    sections
}
