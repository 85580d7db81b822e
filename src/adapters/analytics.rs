use crate::domain::model::AnalyticsEvent;
use crate::domain::ports::AnalyticsBackend;

/// Records telemetry as `tracing` events under the `analytics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsBackend for TracingAnalytics {
    fn initialize(&self, tracking_id: &str) {
        tracing::info!(target: "analytics", tracking_id, "📈 Analytics initialized");
    }

    fn pageview(&self, path: &str) {
        tracing::info!(target: "analytics", path, "📈 pageview");
    }

    fn event(&self, event: &AnalyticsEvent) {
        tracing::info!(
            target: "analytics",
            category = %event.category,
            action = %event.action,
            label = ?event.label,
            timestamp = %event.timestamp.to_rfc3339(),
            "📈 event"
        );
    }
}
