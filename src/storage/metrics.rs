//! Shared metrics recording for storage backends.

use std::time::Instant;

/// Records operation metrics for trust store and score cache operations.
///
/// Emits `storage_operations_total` (counter) and
/// `storage_operation_duration_ms` (histogram), both labelled by backend,
/// operation and status.
///
/// # Examples
///
/// ```rust
/// use std::time::Instant;
/// use trustscore::storage::record_operation_metrics;
///
/// let start = Instant::now();
/// record_operation_metrics("sqlite", "append", start, "success");
/// ```
pub fn record_operation_metrics(
    backend: &'static str,
    operation: &'static str,
    start: Instant,
    status: &'static str,
) {
    metrics::counter!(
        "storage_operations_total",
        "backend" => backend,
        "operation" => operation,
        "status" => status
    )
    .increment(1);
    metrics::histogram!(
        "storage_operation_duration_ms",
        "backend" => backend,
        "operation" => operation,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64() * 1000.0);
}

/// Maps a result to the status label used by [`record_operation_metrics`].
pub(crate) const fn status_label<T>(result: &crate::Result<T>) -> &'static str {
    if result.is_ok() { "success" } else { "error" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_operation_metrics_without_recorder() {
        // No recorder installed: recording must be a silent no-op.
        let start = Instant::now();
        record_operation_metrics("sqlite", "append", start, "success");
        record_operation_metrics("memory", "get", start, "error");
    }

    #[test]
    fn test_status_label() {
        let ok: crate::Result<()> = Ok(());
        let err: crate::Result<()> = Err(crate::Error::Classification("x".to_string()));
        assert_eq!(status_label(&ok), "success");
        assert_eq!(status_label(&err), "error");
    }
}
