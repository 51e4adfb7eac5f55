//! Byte-level serialization of `lopdf` objects onto a forward-only sink.

use lopdf::{Dictionary, Object, Stream, StringFormat};
use quire_traits::{CountingWriter, GenerationError};
use quire_types::ObjectId;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Writes `body` wrapped as indirect object `id` and returns the bytes written.
pub fn write_indirect(
    sink: &mut dyn Write,
    id: ObjectId,
    body: &Object,
) -> Result<usize, GenerationError> {
    let mut out = CountingWriter::new(sink);
    write!(out, "{} {} obj\n", id.get(), id.generation())?;
    write_object(&mut out, body)?;
    out.write_all(b"\nendobj\n")?;
    Ok(out.count() as usize)
}

/// A reference to `id` for use inside another object's body.
pub fn reference(id: ObjectId) -> Object {
    Object::Reference((id.get(), id.generation()))
}

/// Writes the body of `object` with no surrounding `obj`/`endobj`.
///
/// Reals are fixed at three decimals and dictionary keys are emitted in
/// byte order, so equal values always produce equal bytes.
pub fn write_object(writer: &mut dyn Write, object: &Object) -> io::Result<()> {
    match object {
        Object::Null => writer.write_all(b"null"),
        Object::Boolean(true) => writer.write_all(b"true"),
        Object::Boolean(false) => writer.write_all(b"false"),
        Object::Integer(value) => write!(writer, "{value}"),
        Object::Real(value) => write!(writer, "{value:.3}"),
        Object::Name(name) => write_name(writer, name),
        Object::String(bytes, StringFormat::Literal) => write_literal(writer, bytes),
        Object::String(bytes, StringFormat::Hexadecimal) => write_hex(writer, bytes),
        Object::Array(items) => write_array(writer, items),
        Object::Dictionary(dict) => write_dictionary(writer, dict),
        Object::Stream(stream) => write_stream(writer, stream),
        Object::Reference((number, generation)) => write!(writer, "{number} {generation} R"),
    }
}

pub fn write_dictionary(writer: &mut dyn Write, dict: &Dictionary) -> io::Result<()> {
    write_entries(writer, &sorted_entries(dict))
}

fn sorted_entries(dict: &Dictionary) -> BTreeMap<&[u8], &Object> {
    dict.iter().map(|(key, value)| (key.as_slice(), value)).collect()
}

fn write_entries(writer: &mut dyn Write, entries: &BTreeMap<&[u8], &Object>) -> io::Result<()> {
    writer.write_all(b"<<")?;
    for (&key, &value) in entries {
        write_name(writer, key)?;
        writer.write_all(b" ")?;
        write_object(writer, value)?;
        writer.write_all(b" ")?;
    }
    writer.write_all(b">>")
}

/// `/Length` always reflects the content actually written, whatever the
/// stream dictionary says.
fn write_stream(writer: &mut dyn Write, stream: &Stream) -> io::Result<()> {
    let length = Object::Integer(stream.content.len() as i64);
    let mut entries = sorted_entries(&stream.dict);
    entries.insert(&b"Length"[..], &length);

    write_entries(writer, &entries)?;
    writer.write_all(b"\nstream\n")?;
    writer.write_all(&stream.content)?;
    writer.write_all(b"\nendstream")
}

fn write_array(writer: &mut dyn Write, items: &[Object]) -> io::Result<()> {
    writer.write_all(b"[")?;
    let mut items = items.iter();
    if let Some(first) = items.next() {
        write_object(writer, first)?;
        for item in items {
            writer.write_all(b" ")?;
            write_object(writer, item)?;
        }
    }
    writer.write_all(b"]")
}

/// Balanced or not, parentheses are always escaped. `\r` is escaped so a
/// reader cannot normalize it away as an end-of-line.
fn write_literal(writer: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
    writer.write_all(b"(")?;
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => writer.write_all(&[b'\\', byte])?,
            b'\r' => writer.write_all(b"\\r")?,
            _ => writer.write_all(&[byte])?,
        }
    }
    writer.write_all(b")")
}

fn write_hex(writer: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
    writer.write_all(b"<")?;
    bytes.iter().try_for_each(|byte| write!(writer, "{byte:02X}"))?;
    writer.write_all(b">")
}

/// Names escape delimiters, whitespace, `#` and non-printable bytes as `#xx`.
fn write_name(writer: &mut dyn Write, name: &[u8]) -> io::Result<()> {
    writer.write_all(b"/")?;
    for &byte in name {
        let regular = byte.is_ascii_graphic() && !b"#()<>[]{}/%".contains(&byte);
        if regular {
            writer.write_all(&[byte])?;
        } else {
            write!(writer, "#{:02X}", byte)?;
        }
    }
    Ok(())
}
