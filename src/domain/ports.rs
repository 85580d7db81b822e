use crate::domain::error::ConversionError;
use crate::domain::model::{AnalyticsEvent, CssLayout, ReverseOutput, StyleMapping};
use async_trait::async_trait;

/// Both conversion directions behind one seam.
///
/// `reverse` is asynchronous so an implementation may hand the parse to a
/// worker or a remote service; the local implementation completes on first poll.
#[async_trait]
pub trait Converter: Send + Sync {
    fn forward(&self, css: &str) -> std::result::Result<StyleMapping, ConversionError>;

    async fn reverse(
        &self,
        object_text: &str,
        layout: CssLayout,
    ) -> std::result::Result<ReverseOutput, ConversionError>;
}

/// Telemetry sink. Has no influence on conversion results.
pub trait AnalyticsBackend: Send + Sync {
    fn initialize(&self, tracking_id: &str);
    fn pageview(&self, path: &str);
    fn event(&self, event: &AnalyticsEvent);
}
