use crate::serialize::write_indirect;
use lopdf::{Dictionary, Object, Stream, dictionary};
use quire_afm::FontVariantMetrics;
use quire_traits::{GenerationError, PdfObject};
use quire_types::ObjectId;
use std::io::Write;

/// A generic indirect object: an id plus an `lopdf` body.
#[derive(Debug, Clone)]
pub struct IndirectObject {
    id: ObjectId,
    body: Object,
}

impl IndirectObject {
    pub fn new(id: ObjectId, body: impl Into<Object>) -> Self {
        Self {
            id,
            body: body.into(),
        }
    }

    /// A stream object; `/Length` is filled in when written.
    pub fn stream(id: ObjectId, dict: Dictionary, content: Vec<u8>) -> Self {
        Self::new(id, Object::Stream(Stream::new(dict, content)))
    }

    pub fn body(&self) -> &Object {
        &self.body
    }
}

impl PdfObject for IndirectObject {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn write(&self, sink: &mut dyn Write) -> Result<usize, GenerationError> {
        write_indirect(sink, self.id, &self.body)
    }
}

/// A standard Type1 font resource.
///
/// The base font name comes from loaded metrics, so the object cannot be
/// written until metrics with a `FontName` have been attached.
#[derive(Debug, Clone)]
pub struct FontObject {
    id: ObjectId,
    base_font: Option<String>,
}

impl FontObject {
    pub fn new(id: ObjectId) -> Self {
        Self { id, base_font: None }
    }

    pub fn for_metrics(id: ObjectId, metrics: &FontVariantMetrics) -> Self {
        let mut font = Self::new(id);
        font.attach_metrics(metrics);
        font
    }

    /// Takes the base font name from `metrics`. A table without a
    /// `FontName` leaves the object detached.
    pub fn attach_metrics(&mut self, metrics: &FontVariantMetrics) {
        self.base_font = Some(metrics.name())
            .filter(|name| !name.is_empty())
            .map(str::to_string);
    }

    pub fn base_font(&self) -> Option<&str> {
        self.base_font.as_deref()
    }

    fn dictionary(&self) -> Result<Dictionary, GenerationError> {
        let base_font = self.base_font.as_deref().ok_or(GenerationError::MissingResource {
            id: self.id,
            resource: "font metrics",
        })?;
        Ok(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base_font,
            "Encoding" => "WinAnsiEncoding",
        })
    }
}

impl PdfObject for FontObject {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn write(&self, sink: &mut dyn Write) -> Result<usize, GenerationError> {
        let dict = self.dictionary()?;
        write_indirect(sink, self.id, &Object::Dictionary(dict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn id(n: u32) -> ObjectId {
        ObjectId::new(n).unwrap()
    }

    struct ShortSink {
        room: usize,
    }

    impl Write for ShortSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.room == 0 {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "disk full"));
            }
            let n = buf.len().min(self.room);
            self.room -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_indirect_object_is_deterministic() {
        let obj = IndirectObject::new(id(2), dictionary! { "Type" => "Pages", "Count" => 0i64 });
        let mut a = Vec::new();
        let mut b = Vec::new();
        let first = obj.write(&mut a).unwrap();
        let second = obj.write(&mut b).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, a.len());
        assert_eq!(a, b);
        assert_eq!(a, b"2 0 obj\n<</Count 0 /Type /Pages >>\nendobj\n");
    }

    #[test]
    fn test_stream_object() {
        let obj = IndirectObject::stream(id(5), dictionary! {}, b"q Q".to_vec());
        let mut out = Vec::new();
        let n = obj.write(&mut out).unwrap();
        assert_eq!(n, out.len());
        assert_eq!(out, b"5 0 obj\n<</Length 3 >>\nstream\nq Q\nendstream\nendobj\n");
    }

    #[test]
    fn test_font_object_from_metrics() {
        let metrics = quire_afm::load(&b"FontName Courier-Bold\n"[..]).unwrap();
        let font = FontObject::for_metrics(id(3), &metrics);
        assert_eq!(font.base_font(), Some("Courier-Bold"));

        let mut out = Vec::new();
        let n = font.write(&mut out).unwrap();
        assert_eq!(n, out.len());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "3 0 obj\n<</BaseFont /Courier-Bold /Encoding /WinAnsiEncoding /Subtype /Type1 /Type /Font >>\nendobj\n"
        );
    }

    #[test]
    fn test_font_object_without_metrics_fails() {
        let font = FontObject::new(id(3));
        let mut out = Vec::new();
        let result = font.write(&mut out);
        assert!(matches!(
            result,
            Err(GenerationError::MissingResource { resource: "font metrics", .. })
        ));
        assert!(out.is_empty());

        let unnamed = FontObject::for_metrics(id(4), &FontVariantMetrics::default());
        assert!(unnamed.base_font().is_none());
        assert!(unnamed.write(&mut out).is_err());
    }

    #[test]
    fn test_rejecting_sink_is_a_generation_error() {
        let obj = IndirectObject::new(id(1), Object::Null);
        let result = obj.write(&mut ShortSink { room: 4 });
        assert!(matches!(result, Err(GenerationError::Io(_))));
    }
}
