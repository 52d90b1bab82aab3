use itemscan_core::{GrayImage, GrayImageView};

/// Errors raised while constructing a [`Template`].
#[derive(thiserror::Error, Debug)]
pub enum TemplateError {
    #[error("template '{name}' has zero area ({width}x{height})")]
    EmptyImage {
        name: String,
        width: usize,
        height: usize,
    },
}

/// One recognizable object class: a name plus a grayscale reference image.
///
/// Immutable after construction. Zero-area images are rejected here so the
/// transform generator never sees a degenerate source.
#[derive(Clone, Debug)]
pub struct Template {
    name: String,
    image: GrayImage,
}

impl Template {
    pub fn new(name: impl Into<String>, image: GrayImage) -> Result<Self, TemplateError> {
        let name = name.into();
        if image.is_empty() {
            return Err(TemplateError::EmptyImage {
                width: image.width,
                height: image.height,
                name,
            });
        }
        Ok(Self { name, image })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn image(&self) -> GrayImageView<'_> {
        self.image.as_view()
    }
}
