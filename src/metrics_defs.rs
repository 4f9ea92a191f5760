//! Metric definitions for the notifier.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub description: &'static str,
}

pub const NOTIFY_REQUESTS: MetricDef = MetricDef {
    name: "notify.requests",
    metric_type: MetricType::Counter,
    description: "Notifications handled. Tagged with status.",
};

pub const NOTIFY_DURATION: MetricDef = MetricDef {
    name: "notify.duration",
    metric_type: MetricType::Histogram,
    description: "End-to-end notification handling time in seconds",
};

pub const ALL_METRICS: &[MetricDef] = &[NOTIFY_REQUESTS, NOTIFY_DURATION];
