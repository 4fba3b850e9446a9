//! Prometheus metrics for the honeypot gateway.
//!
//! Metrics are exposed on a dedicated HTTP listener when `METRICS_PORT` is
//! non-zero. Recording functions are no-ops until a recorder is installed,
//! so handlers can call them unconditionally.
//!
//! # Available Metrics
//!
//! - `honeypot_messages_received_total` - Messages accepted by the honeypot
//! - `honeypot_auth_rejections_total` - Requests rejected by the auth gate (label: reason)
//! - `honeypot_validation_rejections_total` - Request bodies that failed validation

use std::net::SocketAddr;

use anyhow::Context;
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{error, info};

/// Metric names as constants for consistency.
pub mod names {
    pub const MESSAGES_RECEIVED_TOTAL: &str = "honeypot_messages_received_total";
    pub const AUTH_REJECTIONS_TOTAL: &str = "honeypot_auth_rejections_total";
    pub const VALIDATION_REJECTIONS_TOTAL: &str = "honeypot_validation_rejections_total";
}

/// Reason label values for auth rejections.
pub mod reasons {
    pub const MISSING: &str = "missing";
    pub const INVALID: &str = "invalid";
}

/// Install the Prometheus exporter listening on `metrics_addr`.
pub fn init_metrics(metrics_addr: SocketAddr) -> anyhow::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(metrics_addr)
        .install()
        .context("Failed to install Prometheus exporter")?;

    describe_counter!(
        names::MESSAGES_RECEIVED_TOTAL,
        "Total number of messages accepted by the honeypot"
    );
    describe_counter!(
        names::AUTH_REJECTIONS_TOTAL,
        "Total number of requests rejected by API key authentication"
    );
    describe_counter!(
        names::VALIDATION_REJECTIONS_TOTAL,
        "Total number of request bodies rejected by validation"
    );

    info!(addr = %metrics_addr, "Prometheus metrics endpoint started");
    Ok(())
}

/// Try to initialize metrics, logging any errors but not failing.
pub fn try_init_metrics(metrics_addr: SocketAddr) {
    if let Err(e) = init_metrics(metrics_addr) {
        error!(error = %e, "Failed to initialize metrics, continuing without metrics");
    }
}

pub fn record_message_received() {
    counter!(names::MESSAGES_RECEIVED_TOTAL).increment(1);
}

pub fn record_auth_rejection(reason: &'static str) {
    counter!(names::AUTH_REJECTIONS_TOTAL, "reason" => reason).increment(1);
}

pub fn record_validation_rejection() {
    counter!(names::VALIDATION_REJECTIONS_TOTAL).increment(1);
}
