//! Loading page catalogs from YAML or JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use storecart_core::Catalog;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The file could not be read.
    #[error("Failed to read catalog {}: {source}", path.display())]
    Io {
        /// Catalog path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON is malformed or fails validation.
    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML is malformed or fails validation.
    #[error("Invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The extension is neither YAML nor JSON.
    #[error("Unknown catalog format for {}", .0.display())]
    UnknownFormat(PathBuf),
}

/// Catalog file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl CatalogFormat {
    /// Pick the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Some(Self::Json),
            Some("yaml" | "yml") => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Parse a catalog document.
///
/// # Errors
///
/// Returns an error if the document is malformed or the products fail
/// validation (duplicate ids, negative prices, blank names).
pub fn parse_catalog(content: &str, format: CatalogFormat) -> Result<Catalog, CatalogLoadError> {
    Ok(match format {
        CatalogFormat::Json => serde_json::from_str(content)?,
        CatalogFormat::Yaml => serde_yaml::from_str(content)?,
    })
}

/// Read and parse the catalog at `path`, choosing the format by extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unknown extension, or
/// does not parse.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogLoadError> {
    let path = path.as_ref();
    let format =
        CatalogFormat::from_path(path).ok_or_else(|| CatalogLoadError::UnknownFormat(path.to_path_buf()))?;
    let content = fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&content, format)?;
    info!(path = %path.display(), products = catalog.len(), "Loaded catalog");
    Ok(catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use storecart_core::{Price, ProductId};
    use tempfile::tempdir;

    const YAML: &str = "
- id: 1
  name: Remera oversize
  price: 15000.5
  image: https://img.example/remera.jpg
- id: 2
  name: Gorra
  price: 8000
  image: https://img.example/gorra.jpg
";

    #[test]
    fn test_parse_yaml() {
        let catalog = parse_catalog(YAML, CatalogFormat::Yaml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[0].price, Price::from_cents(1_500_050));
        assert_eq!(catalog.find(ProductId::new(2)).unwrap().name, "Gorra");
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        let yaml = "
- {id: 1, name: A, price: 1, image: a.jpg}
- {id: 1, name: B, price: 2, image: b.jpg}
";
        assert!(matches!(
            parse_catalog(yaml, CatalogFormat::Yaml),
            Err(CatalogLoadError::Yaml(_))
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(CatalogFormat::from_path(Path::new("a.JSON")), Some(CatalogFormat::Json));
        assert_eq!(CatalogFormat::from_path(Path::new("a.yml")), Some(CatalogFormat::Yaml));
        assert_eq!(CatalogFormat::from_path(Path::new("a.toml")), None);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"[{"id": 5, "name": "Buzo", "price": 30000, "image": "buzo.jpg"}]"#).unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.products()[0].id, ProductId::new(5));

        assert!(matches!(
            load_catalog(dir.path().join("missing.yaml")),
            Err(CatalogLoadError::Io { .. })
        ));
        assert!(matches!(
            load_catalog(dir.path().join("catalog.txt")),
            Err(CatalogLoadError::UnknownFormat(_))
        ));
    }
}
