pub mod analytics;
pub mod engine;
pub mod forward;
pub mod normalize;
pub mod reverse;
pub(crate) mod scanner;

pub use crate::domain::error::{ConversionError, ConversionErrorKind};
pub use crate::domain::model::{CssLayout, Declaration, OutputFormat, ReverseOutput, StyleMapping};
pub use crate::domain::ports::{AnalyticsBackend, Converter};
pub use crate::utils::error::Result;

use async_trait::async_trait;

/// In-process converter. Holds no state, so one value can serve any number
/// of concurrent callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalConverter;

#[async_trait]
impl Converter for LocalConverter {
    fn forward(&self, css: &str) -> std::result::Result<StyleMapping, ConversionError> {
        forward::transform(css)
    }

    async fn reverse(
        &self,
        object_text: &str,
        layout: CssLayout,
    ) -> std::result::Result<ReverseOutput, ConversionError> {
        reverse::reverse_with(object_text, layout).await
    }
}
