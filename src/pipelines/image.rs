use super::text;
use crate::error::ImportError;
use crate::images_to_text::{self, OcrBackend};
use crate::model::Recipe;
use log::info;

/// Import a recipe from an uploaded document (photo, scan, PDF or text file)
///
/// The bytes are turned into text by `backend` (plain text needs none), then
/// parsed like any other recipe text.
pub async fn process(
    bytes: &[u8],
    mime: &str,
    backend: Option<&dyn OcrBackend>,
) -> Result<Recipe, ImportError> {
    let extracted = images_to_text::extract(bytes, mime, backend).await?;
    info!("Extracted {} characters of text from {}", extracted.len(), mime);

    // The document was readable but held no text
    if extracted.trim().is_empty() {
        return Err(ImportError::NoRecipeFound);
    }

    text::process(&extracted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_document() {
        let bytes = "Herb Butter\nIngredients:\n- 4 tbsp butter\n- 1 tbsp parsley\n".as_bytes();
        let recipe = process(bytes, "text/plain", None).await.unwrap();
        assert_eq!(recipe.title, "Herb Butter");
        assert_eq!(recipe.ingredients.len(), 2);
    }

    #[tokio::test]
    async fn test_blank_document() {
        let err = process(b"   \n", "text/plain", None).await.unwrap_err();
        assert!(err.is_extraction_failure());
    }

    #[tokio::test]
    async fn test_image_without_backend() {
        let err = process(b"\xFF\xD8\xFF", "image/jpeg", None).await.unwrap_err();
        assert!(err.is_client_error());
    }
}
