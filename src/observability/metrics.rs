//! Metrics collection.
//!
//! # Metrics
//! - `lbaas_relay_requests_total` (counter): relay operations by kind, operation, outcome
//! - `lbaas_relay_request_duration_seconds` (histogram): controller round-trip latency
//!
//! The host process installs the recorder; without one these calls are no-ops.

use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};

use crate::relay::Operation;
use crate::resource::ResourceKind;

pub const REQUESTS_TOTAL: &str = "lbaas_relay_requests_total";
pub const REQUEST_DURATION: &str = "lbaas_relay_request_duration_seconds";

/// Register metric descriptions with the installed recorder.
pub fn describe_metrics() {
    describe_counter!(
        REQUESTS_TOTAL,
        "Total relay operations by resource kind, operation and outcome"
    );
    describe_histogram!(
        REQUEST_DURATION,
        "Time spent relaying one operation to the controller"
    );
}

/// Record the outcome of one relay operation.
pub fn record_operation(
    kind: ResourceKind,
    operation: Operation,
    outcome: &'static str,
    elapsed: Duration,
) {
    counter!(REQUESTS_TOTAL,
        "kind" => kind.singular(),
        "operation" => operation.as_str(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!(REQUEST_DURATION,
        "kind" => kind.singular(),
        "operation" => operation.as_str()
    )
    .record(elapsed.as_secs_f64());
}
