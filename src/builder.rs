use std::sync::Arc;
use std::time::Duration;

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::images_to_text::{GoogleVisionBackend, OcrBackend};
use crate::model::{Recipe, UnitSystem};
use crate::pipelines;

/// Represents the input source for a recipe
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Fetch recipe from a URL
    Url(String),
    /// Parse already extracted text
    Text(String),
    /// Extract text from an uploaded document, then parse it
    Document { bytes: Vec<u8>, mime: String },
}

/// Builder for configuring and executing recipe imports
#[derive(Default)]
pub struct RecipeImporterBuilder {
    source: Option<InputSource>,
    timeout: Option<Duration>,
    config: Option<ImportConfig>,
    ocr_backend: Option<Arc<dyn OcrBackend>>,
    units: Option<UnitSystem>,
}

impl RecipeImporterBuilder {
    /// Set the input source to a URL
    ///
    /// # Example
    /// ```
    /// use recipe_importer::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Url(url.into()));
        self
    }

    /// Set the input source to plain text
    ///
    /// Use this for text that was already extracted from a photo, scan or PDF.
    /// The text parser finds the title, sections and steps by itself.
    ///
    /// # Example
    /// ```
    /// use recipe_importer::RecipeImporter;
    ///
    /// let recipe_text = "Pancakes\nIngredients:\n2 cups flour\nInstructions:\nMix and fry.";
    /// let builder = RecipeImporter::builder()
    ///     .text(recipe_text);
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text(text.into()));
        self
    }

    /// Set the input source to an uploaded document
    ///
    /// `text/plain` is read directly. Images need an OCR backend: either one
    /// passed with [`ocr_backend`](Self::ocr_backend), or Google Vision when
    /// an API key is configured.
    ///
    /// # Example
    /// ```
    /// use recipe_importer::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .document(b"Toast\nIngredients:\n1 slice bread".to_vec(), "text/plain");
    /// ```
    pub fn document(mut self, bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        self.source = Some(InputSource::Document {
            bytes,
            mime: mime.into(),
        });
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_importer::RecipeImporter;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Use this configuration instead of loading `config.toml` and the
    /// environment
    pub fn config(mut self, config: ImportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the text extraction backend for document imports
    pub fn ocr_backend(mut self, backend: Arc<dyn OcrBackend>) -> Self {
        self.ocr_backend = Some(backend);
        self
    }

    /// Convert ingredient quantities to the given unit system
    ///
    /// # Example
    /// ```
    /// use recipe_importer::{RecipeImporter, UnitSystem};
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .units(UnitSystem::Metric);
    /// ```
    pub fn units(mut self, system: UnitSystem) -> Self {
        self.units = Some(system);
        self
    }

    /// Build and execute the recipe import operation
    ///
    /// # Errors
    /// Returns `ImportError` if:
    /// - No input source was specified
    /// - The URL is invalid or the fetch fails
    /// - The document type is unsupported or OCR fails
    /// - No recipe could be extracted
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_importer::RecipeImporter;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipe = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<Recipe, ImportError> {
        let source = self.source.ok_or_else(|| {
            ImportError::InvalidInput(
                "No input source specified. Use .url(), .text() or .document()".to_string(),
            )
        })?;

        let mut config = match self.config {
            Some(config) => config,
            None => ImportConfig::load()?,
        };
        if let Some(timeout) = self.timeout {
            let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            config.timeout_ms = Some(millis.max(1));
        }

        let recipe = match source {
            InputSource::Url(url) => pipelines::url::process(&url, &config).await?,
            InputSource::Text(text) => pipelines::text::process(&text)?,
            InputSource::Document { bytes, mime } => {
                let vision = match self.ocr_backend {
                    Some(_) => None,
                    None => GoogleVisionBackend::from_config(&config),
                };
                let backend: Option<&dyn OcrBackend> = match &self.ocr_backend {
                    Some(backend) => Some(backend.as_ref()),
                    None => vision.as_ref().map(|v| v as &dyn OcrBackend),
                };
                pipelines::image::process(&bytes, &mime, backend).await?
            }
        };

        Ok(match self.units {
            Some(system) => recipe.display_in(system),
            None => recipe,
        })
    }
}

/// Main entry point for the builder API
pub struct RecipeImporter;

impl RecipeImporter {
    /// Creates a new builder for importing recipes
    ///
    /// # Example
    /// ```
    /// use recipe_importer::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder();
    /// ```
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }
}
