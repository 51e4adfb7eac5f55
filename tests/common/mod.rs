#![allow(dead_code)]

pub mod fixtures;

use quire::{FontStyle, InMemoryMetricsSource, PdfObject, StandardFont};
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Serializes `object` into a fresh buffer, checking the reported length.
pub fn write_to_vec(object: &dyn PdfObject) -> Vec<u8> {
    let mut out = Vec::new();
    let reported = object
        .write(&mut out)
        .unwrap_or_else(|e| panic!("object {} failed to write: {}", object.id(), e));
    assert_eq!(
        reported,
        out.len(),
        "object {} reported {} bytes but wrote {}",
        object.id(),
        reported,
        out.len()
    );
    out
}

/// An in-memory source holding every standard font and style.
pub fn standard_source() -> Arc<InMemoryMetricsSource> {
    let source = InMemoryMetricsSource::new();
    for font in StandardFont::ALL {
        for (i, style) in FontStyle::ALL.into_iter().enumerate() {
            let name = font.postscript_name(style);
            source
                .add(
                    font.resource_name(style),
                    fixtures::standard_afm(name, 500 + i as i32),
                )
                .expect("in-memory source accepts fixtures");
        }
    }
    Arc::new(source)
}
