//! Font families built from AFM metrics.
//!
//! `FontLibrary` opens metrics through a [`MetricsSource`], loads each
//! resource at most once and hands out shared, immutable tables. The four
//! styles of a family are independent sources, so they are loaded in
//! parallel when the `parallel-load` feature is enabled.

use crate::error::QuireError;
use quire_afm::{AfmLoader, FontVariantMetrics, LoadOptions};
use quire_resource::FilesystemMetricsSource;
use quire_traits::MetricsSource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

#[cfg(feature = "parallel-load")]
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontStyle {
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 4] = [
        FontStyle::Plain,
        FontStyle::Bold,
        FontStyle::Italic,
        FontStyle::BoldItalic,
    ];

    fn index(self) -> usize {
        match self {
            FontStyle::Plain => 0,
            FontStyle::Bold => 1,
            FontStyle::Italic => 2,
            FontStyle::BoldItalic => 3,
        }
    }
}

/// The standard text fonts every PDF reader provides without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StandardFont {
    TimesRoman,
    Courier,
    Helvetica,
}

impl StandardFont {
    pub const ALL: [StandardFont; 3] = [
        StandardFont::TimesRoman,
        StandardFont::Courier,
        StandardFont::Helvetica,
    ];

    pub fn family_name(self) -> &'static str {
        match self {
            StandardFont::TimesRoman => "Times",
            StandardFont::Courier => "Courier",
            StandardFont::Helvetica => "Helvetica",
        }
    }

    /// PostScript name of one style, e.g. `Courier-BoldOblique`.
    pub fn postscript_name(self, style: FontStyle) -> &'static str {
        use FontStyle::*;
        use StandardFont::*;
        match (self, style) {
            (TimesRoman, Plain) => "Times-Roman",
            (TimesRoman, Bold) => "Times-Bold",
            (TimesRoman, Italic) => "Times-Italic",
            (TimesRoman, BoldItalic) => "Times-BoldItalic",
            (Courier, Plain) => "Courier",
            (Courier, Bold) => "Courier-Bold",
            (Courier, Italic) => "Courier-Oblique",
            (Courier, BoldItalic) => "Courier-BoldOblique",
            (Helvetica, Plain) => "Helvetica",
            (Helvetica, Bold) => "Helvetica-Bold",
            (Helvetica, Italic) => "Helvetica-Oblique",
            (Helvetica, BoldItalic) => "Helvetica-BoldOblique",
        }
    }

    /// Name of the AFM resource for one style, e.g. `Times-Bold.afm`.
    pub fn resource_name(self, style: FontStyle) -> String {
        format!("{}.afm", self.postscript_name(style))
    }
}

/// The four styles of one family.
#[derive(Debug, Clone)]
pub struct FontFamily {
    name: String,
    /// Indexed by `FontStyle::index`; always four entries.
    variants: Vec<Arc<FontVariantMetrics>>,
}

impl FontFamily {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variant(&self, style: FontStyle) -> &Arc<FontVariantMetrics> {
        &self.variants[style.index()]
    }

    pub fn variants(&self) -> impl Iterator<Item = (FontStyle, &Arc<FontVariantMetrics>)> {
        FontStyle::ALL.into_iter().zip(self.variants.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontLibraryConfig {
    /// Passed to every load.
    pub load_options: LoadOptions,
    /// Directory holding `.afm` files, used by [`FontLibrary::from_config`].
    pub metrics_dir: Option<PathBuf>,
}

impl FontLibraryConfig {
    pub fn from_json(json: &str) -> Result<Self, QuireError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Loads and caches metrics tables by resource name.
#[derive(Clone)]
pub struct FontLibrary {
    source: Arc<dyn MetricsSource>,
    loader: AfmLoader,
    /// Loaded tables keyed by resource name. Tables are immutable once built.
    cache: Arc<RwLock<HashMap<String, Arc<FontVariantMetrics>>>>,
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("source", &self.source.name())
            .field("options", &self.loader.options())
            .field("cached", &self.cached_count())
            .finish()
    }
}

impl FontLibrary {
    pub fn new(source: Arc<dyn MetricsSource>) -> Self {
        Self::with_options(source, LoadOptions::default())
    }

    pub fn with_options(source: Arc<dyn MetricsSource>, options: LoadOptions) -> Self {
        Self {
            source,
            loader: AfmLoader::new(options),
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Builds a library over the filesystem directory named in `config`.
    ///
    /// # Errors
    ///
    /// Returns `QuireError::Config` if `metrics_dir` is not set.
    pub fn from_config(config: &FontLibraryConfig) -> Result<Self, QuireError> {
        let dir = config
            .metrics_dir
            .as_ref()
            .ok_or_else(|| QuireError::Config("metricsDir is required".to_string()))?;
        Ok(Self::with_options(
            Arc::new(FilesystemMetricsSource::new(dir)),
            config.load_options,
        ))
    }

    /// Returns the metrics stored under `resource`, loading them on first use.
    pub fn load_variant(&self, resource: &str) -> Result<Arc<FontVariantMetrics>, QuireError> {
        if let Ok(cache) = self.cache.read()
            && let Some(metrics) = cache.get(resource)
        {
            return Ok(metrics.clone());
        }

        log::debug!("Loading metrics '{}' from {}", resource, self.source.name());
        let reader = self.source.open(resource)?;
        let metrics = self
            .loader
            .load(reader)
            .map(Arc::new)
            .map_err(|source| QuireError::Metrics {
                name: resource.to_string(),
                source,
            })?;

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(resource.to_string(), metrics.clone());
        }
        Ok(metrics)
    }

    pub fn standard(
        &self,
        font: StandardFont,
        style: FontStyle,
    ) -> Result<Arc<FontVariantMetrics>, QuireError> {
        self.load_variant(&font.resource_name(style))
    }

    pub fn standard_family(&self, font: StandardFont) -> Result<FontFamily, QuireError> {
        let resources = FontStyle::ALL.map(|style| font.resource_name(style));
        self.family(font.family_name(), &resources)
    }

    /// Loads a family from four resources given in
    /// plain, bold, italic, bold-italic order. Fails if any style fails.
    pub fn family(&self, name: &str, resources: &[String; 4]) -> Result<FontFamily, QuireError> {
        #[cfg(feature = "parallel-load")]
        let variants = resources
            .par_iter()
            .map(|resource| self.load_variant(resource))
            .collect::<Result<Vec<_>, _>>()?;

        #[cfg(not(feature = "parallel-load"))]
        let variants = resources
            .iter()
            .map(|resource| self.load_variant(resource))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FontFamily {
            name: name.to_string(),
            variants,
        })
    }

    /// Number of tables currently cached. Returns 0 if the lock is poisoned.
    pub fn cached_count(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }
}

/// Loads a single `.afm` file outside of any library.
pub fn load_metrics_file(
    path: &Path,
    options: LoadOptions,
) -> Result<Arc<FontVariantMetrics>, QuireError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| QuireError::Config(format!("not a metrics file: {}", path.display())))?;
    FontLibrary::with_options(Arc::new(FilesystemMetricsSource::new(dir)), options).load_variant(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_traits::InMemoryMetricsSource;

    fn afm(name: &str, width: i32) -> String {
        format!("FontName {name}\nC 65 ; WX {width} ; N A ; B 0 0 {width} 700 ;\n")
    }

    fn courier_source() -> Arc<InMemoryMetricsSource> {
        let source = InMemoryMetricsSource::new();
        for (i, style) in FontStyle::ALL.into_iter().enumerate() {
            let ps = StandardFont::Courier.postscript_name(style);
            source
                .add(format!("{ps}.afm"), afm(ps, 600 + i as i32))
                .unwrap();
        }
        Arc::new(source)
    }

    #[test]
    fn test_standard_names() {
        assert_eq!(
            StandardFont::TimesRoman.resource_name(FontStyle::BoldItalic),
            "Times-BoldItalic.afm"
        );
        assert_eq!(
            StandardFont::Helvetica.postscript_name(FontStyle::Italic),
            "Helvetica-Oblique"
        );
        assert_eq!(StandardFont::Courier.family_name(), "Courier");
    }

    #[test]
    fn test_standard_family_loads_all_styles() {
        let library = FontLibrary::new(courier_source());
        let family = library.standard_family(StandardFont::Courier).unwrap();

        assert_eq!(family.name(), "Courier");
        assert_eq!(family.variant(FontStyle::Plain).name(), "Courier");
        assert_eq!(family.variant(FontStyle::Bold).width_of(b'A'), 601);
        assert_eq!(family.variant(FontStyle::BoldItalic).name(), "Courier-BoldOblique");
        assert_eq!(family.variants().count(), 4);
        assert_eq!(library.cached_count(), 4);
    }

    #[test]
    fn test_variants_are_cached() {
        let library = FontLibrary::new(courier_source());
        let a = library.standard(StandardFont::Courier, FontStyle::Plain).unwrap();
        let b = library.standard(StandardFont::Courier, FontStyle::Plain).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(library.cached_count(), 1);
    }

    #[test]
    fn test_missing_style_fails_family() {
        let source = InMemoryMetricsSource::new();
        source.add("Helvetica.afm", afm("Helvetica", 556)).unwrap();
        let library = FontLibrary::new(Arc::new(source));

        let result = library.standard_family(StandardFont::Helvetica);
        assert!(matches!(result, Err(QuireError::Source(_))));
    }

    #[test]
    fn test_malformed_metrics_name_the_resource() {
        let source = InMemoryMetricsSource::new();
        source.add("Broken.afm", "UnderlineThickness thick\n").unwrap();
        let library = FontLibrary::new(Arc::new(source));

        let err = library.load_variant("Broken.afm").unwrap_err();
        assert!(matches!(err, QuireError::Metrics { ref name, .. } if name == "Broken.afm"));
        assert!(err.to_string().contains("Broken.afm"));
        assert_eq!(library.cached_count(), 0);
    }

    #[test]
    fn test_lenient_library() {
        let source = InMemoryMetricsSource::new();
        source.add("Broken.afm", "FontName Broken\nUnderlineThickness thick\n").unwrap();
        let library = FontLibrary::with_options(Arc::new(source), LoadOptions::lenient());

        assert_eq!(library.load_variant("Broken.afm").unwrap().name(), "Broken");
    }

    #[test]
    fn test_config_from_json() {
        let config = FontLibraryConfig::from_json(
            r#"{ "loadOptions": { "malformedLines": "lenient" }, "metricsDir": "fonts/afm" }"#,
        )
        .unwrap();
        assert_eq!(config.load_options, LoadOptions::lenient());
        assert_eq!(config.metrics_dir, Some(PathBuf::from("fonts/afm")));

        let defaults = FontLibraryConfig::from_json("{}").unwrap();
        assert_eq!(defaults, FontLibraryConfig::default());
    }

    #[test]
    fn test_from_config_requires_directory() {
        let result = FontLibrary::from_config(&FontLibraryConfig::default());
        assert!(matches!(result, Err(QuireError::Config(_))));
    }
}
