//! YAML file catalog source.
//!
//! Reads a document of the form
//!
//! ```yaml
//! services:
//!   - name: Tax Prep
//!     summary: File your individual or business taxes.
//!     keywords: [tax, 1040, irs]
//! ```
//!
//! An empty document, a missing `services` key, or `services: null` all
//! yield an empty catalog. Missing `name`/`summary` default to empty
//! strings; missing or null `keywords` to an empty list.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml_ng::Value;

use finchat_core::catalog::CatalogSource;
use finchat_types::error::CatalogError;
use finchat_types::service::ServiceRecord;

#[derive(Debug, Default, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    services: Option<Vec<RawService>>,
}

#[derive(Debug, Deserialize)]
struct RawService {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    keywords: Option<Vec<Value>>,
}

impl From<RawService> for ServiceRecord {
    fn from(raw: RawService) -> Self {
        let keywords = raw
            .keywords
            .unwrap_or_default()
            .into_iter()
            .filter_map(|kw| match kw {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect::<Vec<String>>();
        ServiceRecord::new(
            raw.name.unwrap_or_default(),
            raw.summary.unwrap_or_default(),
            keywords,
        )
    }
}

/// Parse catalog YAML text into records.
pub fn parse_catalog(content: &str) -> Result<Vec<ServiceRecord>, CatalogError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let raw: Option<RawCatalog> =
        serde_yaml_ng::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;

    Ok(raw
        .unwrap_or_default()
        .services
        .unwrap_or_default()
        .into_iter()
        .map(ServiceRecord::from)
        .collect())
}

/// Catalog backed by a YAML file on disk.
#[derive(Debug, Clone)]
pub struct YamlCatalogSource {
    path: PathBuf,
}

impl YamlCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for YamlCatalogSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> Result<Vec<ServiceRecord>, CatalogError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::NotFound(self.path.display().to_string()));
            }
            Err(err) => {
                return Err(CatalogError::Io(format!("{}: {err}", self.path.display())));
            }
        };

        tracing::debug!(path = %self.path.display(), bytes = content.len(), "Read catalog file");
        parse_catalog(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finchat_core::catalog::ServiceCatalog;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
services:
  - name: Tax Prep
    summary: file your taxes
    keywords: [tax, 1040]
  - name: Payroll
    summary: run payroll
    keywords:
      - payroll
"#;

    #[test]
    fn parses_services_in_order() {
        let records = parse_catalog(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Tax Prep");
        assert_eq!(records[0].keywords, vec!["tax".to_string(), "1040".to_string()]);
        assert_eq!(records[1].summary, "run payroll");
    }

    #[test]
    fn empty_document_is_empty_catalog() {
        assert!(parse_catalog("").unwrap().is_empty());
        assert!(parse_catalog("   \n").unwrap().is_empty());
        assert!(parse_catalog("~").unwrap().is_empty());
    }

    #[test]
    fn missing_or_null_services_is_empty_catalog() {
        assert!(parse_catalog("other: 1").unwrap().is_empty());
        assert!(parse_catalog("services: null").unwrap().is_empty());
        assert!(parse_catalog("services: []").unwrap().is_empty());
    }

    #[test]
    fn missing_fields_default() {
        let records = parse_catalog("services:\n  - name: Bookkeeping\n    keywords: null\n").unwrap();
        assert_eq!(records[0].name, "Bookkeeping");
        assert_eq!(records[0].summary, "");
        assert!(records[0].keywords.is_empty());
    }

    #[test]
    fn malformed_document_is_parse_error() {
        let err = parse_catalog("services: [unclosed").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let source = YamlCatalogSource::new(tmp.path().join("services.yaml"));
        let err = source.read().await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn reads_file_from_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("services.yaml");
        tokio::fs::write(&path, SAMPLE).await.unwrap();

        let source = YamlCatalogSource::new(&path);
        let records = source.read().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(source.describe(), path.display().to_string());
    }

    #[tokio::test]
    async fn cached_catalog_survives_file_removal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("services.yaml");
        tokio::fs::write(&path, SAMPLE).await.unwrap();

        let catalog = ServiceCatalog::new(YamlCatalogSource::new(&path));
        let first = catalog.load_services().await;
        tokio::fs::remove_file(&path).await.unwrap();
        let second = catalog.load_services().await;

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn malformed_file_degrades_to_empty_catalog() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("services.yaml");
        tokio::fs::write(&path, "services: {not: [a, list").await.unwrap();

        let catalog = ServiceCatalog::new(YamlCatalogSource::new(&path));
        assert!(catalog.load_services().await.is_empty());
    }
}
