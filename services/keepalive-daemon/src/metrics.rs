//! Prometheus metrics exposition
//!
//! The keep-alive library emits `keepalive_requests_total` and
//! `keepalive_request_duration_seconds`; the daemon adds
//! `keepalive_login_required` (gauge, 1 once the session has been rejected).

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

/// Identity calls are fast; anything past the client timeout never lands here.
const DURATION_BUCKETS: &[f64] = &[0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];

fn builder() -> PrometheusBuilder {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(betfair_keepalive::metrics::REQUEST_DURATION_SECONDS.to_string()),
            DURATION_BUCKETS,
        )
        .expect("histogram buckets are non-empty")
}

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_recorder() -> PrometheusHandle {
    builder()
        .install_recorder()
        .expect("failed to install Prometheus recorder")
}

pub fn set_login_required(required: bool) {
    metrics::gauge!("keepalive_login_required").set(if required { 1.0 } else { 0.0 });
}

#[cfg(test)]
pub(crate) fn isolated_recorder() -> (
    metrics_exporter_prometheus::PrometheusRecorder,
    PrometheusHandle,
) {
    let recorder = builder().build_recorder();
    let handle = recorder.handle();
    (recorder, handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_does_not_panic_without_recorder() {
        set_login_required(true);
    }

    #[test]
    fn duration_renders_as_histogram() {
        let (recorder, handle) = isolated_recorder();
        metrics::with_local_recorder(&recorder, || {
            betfair_keepalive::metrics::record_outcome("success", Some(0.2));
            set_login_required(false);
        });

        let output = handle.render();
        assert!(
            output.contains("keepalive_request_duration_seconds_bucket"),
            "got: {output}"
        );
        assert!(output.contains("keepalive_login_required 0"), "got: {output}");
    }
}
