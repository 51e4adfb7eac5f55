use crate::builder::MetricsBuilder;
use crate::config::{LoadOptions, MalformedLinePolicy};
use crate::error::{LineError, MetricsError};
use crate::metrics::FontVariantMetrics;
use crate::tokenizer::parse_line;
use std::borrow::Cow;
use std::io::BufRead;

/// Loads [`FontVariantMetrics`] from AFM text in a single forward pass.
///
/// Loading is all-or-nothing: either the whole source is consumed and a
/// table is returned, or an error is returned and no table exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct AfmLoader {
    options: LoadOptions,
}

impl AfmLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> LoadOptions {
        self.options
    }

    /// Reads `reader` to exhaustion. The reader is borrowed for the call
    /// and left to the caller to close.
    ///
    /// # Errors
    ///
    /// - [`MetricsError::Io`] if the reader fails.
    /// - [`MetricsError::Parse`] for the first malformed line, unless the
    ///   options ask for lenient loading.
    pub fn load<R: BufRead>(&self, mut reader: R) -> Result<FontVariantMetrics, MetricsError> {
        let mut builder = MetricsBuilder::new();
        let mut buf = Vec::with_capacity(128);
        let mut line_number = 0;
        let mut skipped = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_number += 1;

            // Only the last line of a source can lack its newline.
            let terminated = buf.ends_with(b"\n");
            let text = decode_line(&buf);
            let parsed = parse_line(&text).and_then(|line| match line.open_ended_keyword() {
                Some(keyword) if !terminated => Err(LineError::Unterminated { keyword }),
                _ => Ok(line),
            });
            match parsed {
                Ok(line) => builder.apply(line),
                Err(source) => match self.options.malformed_lines {
                    MalformedLinePolicy::Strict => {
                        return Err(MetricsError::Parse {
                            line: line_number,
                            source,
                        });
                    }
                    MalformedLinePolicy::Lenient => {
                        log::warn!("Skipping malformed metrics line {}: {}", line_number, source);
                        skipped += 1;
                    }
                },
            }
        }

        let metrics = builder.build();
        log::debug!(
            "Loaded metrics for '{}': {} lines, {} glyphs, {} kerning pairs, {} skipped",
            metrics.name(),
            line_number,
            metrics.glyph_count(),
            metrics.kerning_pair_count(),
            skipped
        );
        Ok(metrics)
    }

    pub fn load_bytes(&self, data: &[u8]) -> Result<FontVariantMetrics, MetricsError> {
        self.load(data)
    }
}

/// Loads `reader` with [`LoadOptions::default`].
pub fn load<R: BufRead>(reader: R) -> Result<FontVariantMetrics, MetricsError> {
    AfmLoader::default().load(reader)
}

/// Strips the line terminator and decodes lossily. Comment and notice lines
/// in older AFM files are often Latin-1; the fields we read are ASCII.
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}
