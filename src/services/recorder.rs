//! Visit recorder: appends visits to the selected store and replays the log.

use crate::{
    error::StoreError,
    models::{VisitRecord, VisitorsLogResponse},
    services::{AppMetrics, file_store::format_record, store::LogStore},
};
use chrono::Local;
use std::sync::Arc;
use tracing::{error, info};

/// Front door to the log store used by the HTTP handlers
#[derive(Clone)]
pub struct VisitRecorder {
    store: Arc<dyn LogStore>,
    metrics: Option<AppMetrics>,
}

impl VisitRecorder {
    pub fn new(store: Arc<dyn LogStore>, metrics: Option<AppMetrics>) -> Self {
        Self { store, metrics }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Append one record.
    ///
    /// Failures are logged and handed back to the caller; the record is not
    /// retried and is considered lost.
    pub async fn append(&self, record: &VisitRecord) -> Result<(), StoreError> {
        let result = self.store.append(record).await;

        match &result {
            Ok(()) => info!(
                backend = self.backend(),
                ip = %record.ip,
                path = %record.path,
                "Visit recorded"
            ),
            Err(e) => error!(
                backend = self.backend(),
                ip = %record.ip,
                error = %e,
                "Failed to record visit"
            ),
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_visit(self.backend(), result.is_ok());
        }

        result
    }

    /// Every record in the store
    pub async fn read_all(&self) -> Result<Vec<VisitRecord>, StoreError> {
        self.store.read_all().await.inspect_err(|e| {
            if !e.is_not_found() {
                error!(backend = self.backend(), error = %e, "Failed to read visitor log");
            }
        })
    }

    /// The whole log as one preformatted text blob
    pub async fn render_text(&self) -> Result<String, StoreError> {
        let records = self.read_all().await?;
        Ok(render_records(&records))
    }

    /// The log wrapped for JSON consumers; a store with no log yet is empty
    pub async fn render_json(&self) -> Result<VisitorsLogResponse, StoreError> {
        let records = match self.read_all().await {
            Ok(records) => records,
            Err(StoreError::LogNotFound) => Vec::new(),
            Err(e) => return Err(e),
        };

        Ok(VisitorsLogResponse {
            visitors_log: render_records(&records),
            timestamp: Local::now().to_rfc3339(),
            count: records.len(),
        })
    }
}

/// Render records in the log block format
pub fn render_records(records: &[VisitRecord]) -> String {
    records.iter().map(format_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::file_store::{FileLogStore, RULE_LINE};
    use std::collections::BTreeMap;

    fn record(ip: &str) -> VisitRecord {
        VisitRecord::new(
            ip.to_string(),
            "GET".to_string(),
            "/".to_string(),
            "http://localhost/".to_string(),
            Some("curl/8.4.0".to_string()),
            BTreeMap::new(),
        )
    }

    #[tokio::test]
    async fn test_append_and_render() {
        let dir = tempfile::tempdir().unwrap();
        let metrics = AppMetrics::new().unwrap();
        let store = Arc::new(FileLogStore::new(dir.path().join("log.txt")));
        let recorder = VisitRecorder::new(store, Some(metrics.clone()));

        recorder.append(&record("8.8.8.8")).await.unwrap();
        recorder.append(&record("1.1.1.1")).await.unwrap();

        let text = recorder.render_text().await.unwrap();
        assert_eq!(text.matches(RULE_LINE).count(), 2);
        assert!(text.find("8.8.8.8").unwrap() < text.find("1.1.1.1").unwrap());

        let json = recorder.render_json().await.unwrap();
        assert_eq!(json.count, 2);
        assert_eq!(json.visitors_log, text);
        assert!(chrono::DateTime::parse_from_rfc3339(&json.timestamp).is_ok());

        assert!(metrics.render().unwrap().contains("visits_recorded_total"));
    }

    #[tokio::test]
    async fn test_missing_log() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileLogStore::new(dir.path().join("none.txt")));
        let recorder = VisitRecorder::new(store, None);

        assert!(recorder.render_text().await.unwrap_err().is_not_found());

        let json = recorder.render_json().await.unwrap();
        assert_eq!(json.count, 0);
        assert!(json.visitors_log.is_empty());
    }

    #[tokio::test]
    async fn test_failed_append_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let recorder = VisitRecorder::new(Arc::new(FileLogStore::new(&path)), None);
        recorder.append(&record("8.8.8.8")).await.unwrap();

        // Same directory, but the log path is now a directory and cannot be opened
        let broken = VisitRecorder::new(Arc::new(FileLogStore::new(dir.path())), None);
        let err = broken.append(&record("9.9.9.9")).await.unwrap_err();
        assert!(!err.user_message().is_empty());

        let records = recorder.read_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ip, "8.8.8.8");
    }
}
