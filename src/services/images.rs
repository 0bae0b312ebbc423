//! Turning operator-selected image files into content references.

use crate::error::IngestError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::Path;

/// Converts raw image bytes into a string usable as element content or a logo URL.
pub trait ImageIngestor {
    /// Produces a reference for `bytes`, named `file_name` by the operator.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] when the bytes cannot be used as an image.
    fn ingest(&self, file_name: &str, bytes: &[u8]) -> Result<String, IngestError>;

    /// Reads `path` and ingests its contents.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Read`] if the file cannot be read, otherwise
    /// whatever [`ImageIngestor::ingest`] returns.
    fn ingest_file(&self, path: &Path) -> Result<String, IngestError> {
        let bytes = std::fs::read(path).map_err(|source| IngestError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.ingest(&file_name, &bytes)
    }
}

/// Inlines images as `data:` URIs so the configuration stays self-contained.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUriIngestor;

impl ImageIngestor for DataUriIngestor {
    fn ingest(&self, file_name: &str, bytes: &[u8]) -> Result<String, IngestError> {
        if bytes.is_empty() {
            return Err(IngestError::Empty {
                file_name: file_name.to_string(),
            });
        }

        let mime = mime_guess::from_path(file_name).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(IngestError::NotAnImage {
                file_name: file_name.to_string(),
                mime: mime.to_string(),
            });
        }

        Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_png_becomes_data_uri() {
        let uri = DataUriIngestor.ingest("logo.png", PNG_MAGIC).unwrap();
        assert_eq!(uri, "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_mime_from_extension() {
        let uri = DataUriIngestor.ingest("foto.JPG", b"jpeg").unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        let uri = DataUriIngestor.ingest("icon.svg", b"<svg/>").unwrap();
        assert!(uri.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_rejects_empty_and_non_images() {
        assert!(matches!(
            DataUriIngestor.ingest("logo.png", &[]),
            Err(IngestError::Empty { .. })
        ));
        assert!(matches!(
            DataUriIngestor.ingest("notes.txt", b"hola"),
            Err(IngestError::NotAnImage { .. })
        ));
        assert!(matches!(
            DataUriIngestor.ingest("no-extension", b"data"),
            Err(IngestError::NotAnImage { .. })
        ));
    }

    #[test]
    fn test_ingest_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hero.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();
        let uri = DataUriIngestor.ingest_file(&path).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));

        let missing = temp_dir.path().join("missing.png");
        assert!(matches!(
            DataUriIngestor.ingest_file(&missing),
            Err(IngestError::Read { .. })
        ));
    }
}
