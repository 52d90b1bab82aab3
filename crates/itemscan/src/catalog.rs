//! Template decoding and catalog loading.

use std::fs;
use std::path::Path;

use itemscan_core::GrayImage;
use itemscan_search::{Template, TemplateError};
use log::{info, warn};

/// Errors raised while loading a template catalog.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("failed to decode template '{name}'")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An ordered, named collection of grayscale templates.
///
/// Entry order is preserved from the input and decides the ranking
/// tie-break, so two catalogs loaded from the same source always classify
/// identically.
#[derive(Clone, Debug, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn from_templates(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Decode `(name, bytes)` entries into grayscale templates.
    ///
    /// In non-strict mode an entry that fails to decode, or decodes to a
    /// zero-area image, is skipped with a warning and the rest of the load
    /// continues. In strict mode the first failure aborts the whole load.
    pub fn from_entries<I, N, B>(entries: I, strict: bool) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (N, B)>,
        N: Into<String>,
        B: AsRef<[u8]>,
    {
        let mut templates = Vec::new();
        for (name, bytes) in entries {
            let name = name.into();
            match decode_template(&name, bytes.as_ref()) {
                Ok(template) => templates.push(template),
                Err(err) if strict => return Err(err),
                Err(err) => warn!("skipping template '{name}': {err}"),
            }
        }
        info!("loaded {} template(s)", templates.len());
        Ok(Self { templates })
    }

    /// Load every image file of a directory, named by file stem.
    ///
    /// Files are visited in sorted file-name order so the catalog order,
    /// and with it the ranking tie-break, does not depend on directory
    /// enumeration order.
    pub fn load_dir(dir: impl AsRef<Path>, strict: bool) -> Result<Self, CatalogError> {
        let mut paths: Vec<_> = fs::read_dir(dir.as_ref())?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            entries.push((name, fs::read(&path)?));
        }
        Self::from_entries(entries, strict)
    }

    #[inline]
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn decode_template(name: &str, bytes: &[u8]) -> Result<Template, CatalogError> {
    let decoded = image::load_from_memory(bytes).map_err(|source| CatalogError::Decode {
        name: name.to_string(),
        source,
    })?;
    let luma = decoded.to_luma8();
    let gray = GrayImage {
        width: luma.width() as usize,
        height: luma.height() as usize,
        data: luma.into_raw(),
    };
    Ok(Template::new(name, gray)?)
}
