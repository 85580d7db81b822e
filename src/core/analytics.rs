use crate::domain::model::{AnalyticsConfig, AnalyticsEvent};
use crate::domain::ports::AnalyticsBackend;
use std::sync::atomic::{AtomicBool, Ordering};

/// Gatekeeper in front of an [`AnalyticsBackend`].
///
/// `init` only reaches the backend when tracking is enabled and a tracking id
/// is configured; until then `pageview` and `event` are silently dropped.
pub struct AnalyticsManager<B: AnalyticsBackend> {
    backend: B,
    config: AnalyticsConfig,
    initialized: AtomicBool,
}

impl<B: AnalyticsBackend> AnalyticsManager<B> {
    pub fn new(backend: B, config: AnalyticsConfig) -> Self {
        Self {
            backend,
            config,
            initialized: AtomicBool::new(false),
        }
    }

    /// Returns whether the backend is initialized afterwards.
    pub fn init(&self) -> bool {
        if self.is_initialized() {
            return true;
        }

        match self.config.active_tracking_id() {
            Some(tracking_id) => {
                self.backend.initialize(tracking_id);
                self.initialized.store(true, Ordering::Release);
                tracing::debug!("Analytics initialized");
                true
            }
            None => {
                tracing::debug!("Analytics disabled or tracking id missing, skipping init");
                false
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn pageview(&self, path: &str) {
        if self.is_initialized() {
            self.backend.pageview(path);
        }
    }

    pub fn event(&self, event: AnalyticsEvent) {
        if self.is_initialized() {
            self.backend.event(&event);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
