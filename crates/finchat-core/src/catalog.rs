//! Service catalog port and process-lifetime cache.
//!
//! `CatalogSource` is implemented in finchat-infra (YAML on disk). The
//! `ServiceCatalog` wrapper reads the source at most once and serves the
//! same immutable slice to every caller afterwards.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use finchat_types::error::CatalogError;
use finchat_types::service::ServiceRecord;

/// Trait for catalog backends.
pub trait CatalogSource: Send + Sync {
    /// Human-readable description of where records come from (for logs).
    fn describe(&self) -> String;

    /// Read every record from the backing resource.
    fn read(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ServiceRecord>, CatalogError>> + Send;
}

/// Cached view over a [`CatalogSource`].
///
/// Errors never escape: a missing or malformed resource is logged and
/// cached as an empty catalog, so later calls do not retry the read.
pub struct ServiceCatalog<S: CatalogSource> {
    source: S,
    cell: OnceCell<Arc<[ServiceRecord]>>,
}

impl<S: CatalogSource> ServiceCatalog<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// Load the catalog, reading the source only on the first call.
    pub async fn load_services(&self) -> Arc<[ServiceRecord]> {
        self.cell
            .get_or_init(|| async {
                match self.source.read().await {
                    Ok(records) => {
                        info!(
                            source = %self.source.describe(),
                            count = records.len(),
                            "Service catalog loaded"
                        );
                        Arc::from(records)
                    }
                    Err(e) => {
                        warn!(
                            source = %self.source.describe(),
                            error = %e,
                            "Service catalog unavailable, continuing with empty catalog"
                        );
                        Arc::from(Vec::new())
                    }
                }
            })
            .await
            .clone()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory source that counts reads.
    pub(crate) struct StaticSource {
        records: Vec<ServiceRecord>,
        fail: bool,
        pub(crate) reads: Arc<AtomicUsize>,
    }

    impl StaticSource {
        pub(crate) fn new(records: Vec<ServiceRecord>) -> Self {
            Self {
                records,
                fail: false,
                reads: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                records: Vec::new(),
                fail: true,
                reads: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl CatalogSource for StaticSource {
        fn describe(&self) -> String {
            "static".to_string()
        }

        async fn read(&self) -> Result<Vec<ServiceRecord>, CatalogError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(CatalogError::NotFound("services.yaml".to_string()))
            } else {
                Ok(self.records.clone())
            }
        }
    }

    pub(crate) fn sample_records() -> Vec<ServiceRecord> {
        vec![
            ServiceRecord::new("Tax Prep", "file your taxes", ["tax", "1040"]),
            ServiceRecord::new("Payroll", "run payroll", ["payroll"]),
        ]
    }

    #[tokio::test]
    async fn second_load_does_not_reread_source() {
        let source = StaticSource::new(sample_records());
        let reads = source.reads.clone();
        let catalog = ServiceCatalog::new(source);

        let first = catalog.load_services().await;
        let second = catalog.load_services().await;

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failing_source_degrades_to_empty_and_is_cached() {
        let source = StaticSource::failing();
        let reads = source.reads.clone();
        let catalog = ServiceCatalog::new(source);

        assert!(catalog.load_services().await.is_empty());
        assert!(catalog.load_services().await.is_empty());
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_loads_read_once() {
        let source = StaticSource::new(sample_records());
        let reads = source.reads.clone();
        let catalog = Arc::new(ServiceCatalog::new(source));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let catalog = catalog.clone();
            handles.push(tokio::spawn(async move { catalog.load_services().await.len() }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), 2);
        }
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }
}
