//! Notifier implementations.
//!
//! The enabled/disabled decision is made once, at startup, by picking an
//! implementation — not re-checked on every emit. Both implementations honor
//! the fail-open contract: `emit` takes `&self`, returns nothing, and any
//! internal failure is reported through tracing only.

use std::sync::Arc;

use chrono::Utc;

use crate::config::AnalyticsConfig;
use crate::event::AnalyticsEvent;

/// Sink for analytics events.
///
/// Implementations must be safe to call from concurrent operations and must
/// never block the caller materially. Swapping the destination (log stream,
/// real analytics backend) must not require changes to the catalog service.
pub trait AnalyticsNotifier: Send + Sync {
    fn emit(&self, event: AnalyticsEvent);
}

/// Notifier used when analytics is disabled or misconfigured.
///
/// Every emit is a silent no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl AnalyticsNotifier for NoopNotifier {
    fn emit(&self, _event: AnalyticsEvent) {}
}

/// Notifier that writes formatted events to the tracing sink.
///
/// Stands in for a real analytics transport: it renders the event name, the
/// destination property id, every parameter, and a timestamp. A production
/// transport would push the same tuple over the wire instead.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    property_id: String,
}

impl LogNotifier {
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
        }
    }

    fn render(&self, event: &AnalyticsEvent) -> Result<String, serde_json::Error> {
        serde_json::to_string(&event.params)
    }
}

impl AnalyticsNotifier for LogNotifier {
    fn emit(&self, event: AnalyticsEvent) {
        // Fail-open: a formatting error is logged and dropped, never surfaced.
        match self.render(&event) {
            Ok(params) => {
                tracing::info!(
                    target: "analytics",
                    event = %event.name,
                    property_id = %self.property_id,
                    %params,
                    timestamp_ms = Utc::now().timestamp_millis(),
                    "analytics event"
                );
            }
            Err(err) => {
                tracing::error!(
                    target: "analytics",
                    event = %event.name,
                    error = %err,
                    "failed to render analytics event"
                );
            }
        }
    }
}

/// Select the notifier implementation for this process.
///
/// An unconfigured deployment (disabled, or missing property id) gets the
/// no-op notifier; the runtime path never branches on configuration again.
pub fn notifier_from_config(config: &AnalyticsConfig) -> Arc<dyn AnalyticsNotifier> {
    if config.configured() {
        Arc::new(LogNotifier::new(config.property_id.clone()))
    } else {
        tracing::warn!("analytics not configured; catalog events will be dropped");
        Arc::new(NoopNotifier)
    }
}
