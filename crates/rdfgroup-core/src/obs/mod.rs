//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Grouping and projection never touch counters directly; they emit
//! `MetricsEvent`s through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;


// re-exports
pub use metrics::{EventOps, EventReport};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
