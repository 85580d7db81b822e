// Adapters layer: 外部系統的具體實作

pub mod analytics;

pub use analytics::TracingAnalytics;
