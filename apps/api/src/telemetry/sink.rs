//! Telemetry sinks: where accepted records end up.
//!
//! `AppState` holds an `Arc<dyn EventSink>`. The default sink writes one
//! structured log line per record on the `telemetry` target, which a log
//! shipper can route separately from application logs.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::telemetry::TelemetryRecord;

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn record(&self, record: TelemetryRecord) -> Result<()>;
}

pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn record(&self, record: TelemetryRecord) -> Result<()> {
        let payload =
            serde_json::to_string(&record).context("Failed to serialize telemetry record")?;
        info!(target: "telemetry", kind = record.kind(), anon_id = record.anon_id(), %payload, "telemetry record");
        Ok(())
    }
}

/// Collects records in memory; used by tests to observe what was emitted.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryEventSink {
    records: parking_lot::Mutex<Vec<TelemetryRecord>>,
}

#[cfg(test)]
impl MemoryEventSink {
    pub fn records(&self) -> Vec<TelemetryRecord> {
        self.records.lock().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl EventSink for MemoryEventSink {
    async fn record(&self, record: TelemetryRecord) -> Result<()> {
        self.records.lock().push(record);
        Ok(())
    }
}

/// Rejects every record.
#[cfg(test)]
pub struct FailingEventSink;

#[cfg(test)]
#[async_trait]
impl EventSink for FailingEventSink {
    async fn record(&self, _record: TelemetryRecord) -> Result<()> {
        anyhow::bail!("sink unavailable")
    }
}
