use crate::core::analytics::AnalyticsManager;
use crate::core::{AnalyticsBackend, Converter};
use crate::domain::model::{AnalyticsEvent, CssLayout, OutputFormat};
use crate::utils::error::Result;

pub const EVENT_CATEGORY: &str = "Translation";
pub const ACTION_FROM_CSS: &str = "From CSS";
pub const ACTION_TO_CSS: &str = "To CSS";

/// Host-side driver: feeds text to a [`Converter`], renders the result and
/// reports the outcome to analytics. Blank input converts to blank output.
pub struct ConversionEngine<C: Converter, B: AnalyticsBackend> {
    converter: C,
    analytics: AnalyticsManager<B>,
}

impl<C: Converter, B: AnalyticsBackend> ConversionEngine<C, B> {
    pub fn new(converter: C, analytics: AnalyticsManager<B>) -> Self {
        Self {
            converter,
            analytics,
        }
    }

    pub fn analytics(&self) -> &AnalyticsManager<B> {
        &self.analytics
    }

    pub fn css_to_object(&self, css: &str, format: OutputFormat) -> Result<String> {
        if css.trim().is_empty() {
            return Ok(String::new());
        }

        let result: Result<String> = self
            .converter
            .forward(css)
            .map_err(Into::into)
            .and_then(|mapping| {
                tracing::debug!("Parsed {} declarations", mapping.len());
                Ok(mapping.to_object_literal(format)?)
            });

        self.report(ACTION_FROM_CSS, result.is_ok());
        result
    }

    pub async fn object_to_css(&self, object_text: &str, layout: CssLayout) -> Result<String> {
        if object_text.trim().is_empty() {
            return Ok(String::new());
        }

        let result = self.converter.reverse(object_text, layout).await;

        self.report(ACTION_TO_CSS, result.is_ok());
        Ok(result?.css)
    }

    fn report(&self, action: &str, success: bool) {
        let event = AnalyticsEvent::new(EVENT_CATEGORY, action);
        let event = if success {
            event
        } else {
            event.with_label("error")
        };
        self.analytics.event(event);
    }
}
