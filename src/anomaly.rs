use thiserror::Error;

/// Data-quality events observed while ingesting or walking a menu batch.
///
/// None of these abort processing. The engine degrades to a best-effort
/// structural reconstruction and reports what it saw; whether anomalies are
/// surfaced to an administrator is the calling application's policy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Anomaly {
    #[error("record {index} skipped: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("node '{id}' declares unknown parent '{parent_id}', recovered as root")]
    DanglingParent { id: String, parent_id: String },

    #[error("duplicate id '{id}' re-keyed as '{assigned}'")]
    IdCollision { id: String, assigned: String },

    #[error("depth bound {limit} exceeded under '{context}', deeper entries dropped")]
    DepthExceeded { context: String, limit: u32 },

    #[error("node '{id}' is part of a parent cycle, promoted to root")]
    CycleRecovered { id: String },

    #[error("batch truncated to {kept} records ({dropped} dropped)")]
    BatchTruncated { kept: usize, dropped: usize },

    #[error("unrecognized batch shape: {reason}")]
    UnrecognizedShape { reason: String },
}

/// Emit a batch's anomalies to the log, one warning per entry.
pub fn log_anomalies(anomalies: &[Anomaly]) {
    if anomalies.is_empty() || !crate::config::CONFIG.logging.log_anomalies {
        return;
    }
    for anomaly in anomalies {
        tracing::warn!("menu batch anomaly: {}", anomaly);
    }
    if crate::config::CONFIG.logging.debug_logging {
        tracing::debug!("menu batch produced {} anomalies", anomalies.len());
    }
}
