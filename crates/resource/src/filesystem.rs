//! Filesystem-backed metrics source for native platforms.
//!
//! Descriptions are opened relative to a base directory. Absolute names and
//! names that would resolve outside the base directory are refused.

use quire_traits::{MetricsReader, MetricsSource, SourceError};
use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};

/// Opens `<base>/<name>` for each request.
#[derive(Debug)]
pub struct FilesystemMetricsSource {
    base_path: PathBuf,
    /// Canonicalized base path for containment checks
    canonical_base: Option<PathBuf>,
}

impl FilesystemMetricsSource {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Returns `None` if `name` would escape the base directory.
    fn resolve_path_safe(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        if relative.is_absolute() {
            return None;
        }
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return None;
        }

        let full_path = self.base_path.join(relative);

        // Symlinks can still point outside the base.
        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        Some(full_path)
    }
}

impl MetricsSource for FilesystemMetricsSource {
    fn open(&self, name: &str) -> Result<MetricsReader, SourceError> {
        let path = self
            .resolve_path_safe(name)
            .ok_or_else(|| SourceError::NotFound(format!("{} (outside base directory)", name)))?;

        log::debug!("Opening metrics file {}", path.display());
        let file = File::open(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(name.to_string())
            } else {
                SourceError::Io {
                    name: name.to_string(),
                    source: e,
                }
            }
        })?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn exists(&self, name: &str) -> bool {
        self.resolve_path_safe(name)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "FilesystemMetricsSource"
    }
}
