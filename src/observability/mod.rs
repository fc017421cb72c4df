//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every relay operation produces:
//!     → logging.rs (structured log events inside a per-operation span)
//!     → metrics.rs (outcome counters, duration histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Whatever metrics recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID from the caller's context flows into every span
//! - Metrics go through the `metrics` facade; no exporter is owned here

pub mod logging;
pub mod metrics;
