use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder once per process and return its handle.
///
/// Later calls return the same handle, so several applications can be built
/// in one process (integration tests do this).
pub fn init_metrics() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if let Err(e) = metrics::set_global_recorder(recorder) {
                tracing::warn!("Metrics recorder already installed: {}", e);
            }
            handle
        })
        .clone()
}

/// Render the current metrics in Prometheus text format.
pub fn render_metrics(handle: Option<&PrometheusHandle>) -> String {
    match handle {
        Some(handle) => {
            handle.run_upkeep();
            handle.render()
        }
        None => "# Metrics recorder not initialized\n".to_string(),
    }
}

/// Record a successfully created provider order.
pub fn record_order_created(currency: &str, amount_minor: u64) {
    counter!(
        "payment_orders_total",
        "currency" => currency.to_string(),
        "outcome" => "created"
    )
    .increment(1);
    counter!(
        "payment_order_amount_minor_total",
        "currency" => currency.to_string()
    )
    .increment(amount_minor);
}

/// Record a provider-side failure.
pub fn record_order_failed(currency: &str, retryable: bool) {
    let outcome = if retryable {
        "failed_retryable"
    } else {
        "failed"
    };
    counter!(
        "payment_orders_total",
        "currency" => currency.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a request rejected before reaching the provider.
pub fn record_invalid_amount() {
    counter!("payment_orders_rejected_total", "reason" => "invalid_amount").increment(1);
}
