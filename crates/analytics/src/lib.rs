//! Analytics event notifier.
//!
//! Catalog operations produce [`AnalyticsEvent`] values and hand them to an
//! [`AnalyticsNotifier`]. The notifier is fail-open: emitting can never error,
//! block, or otherwise alter the outcome of the operation that triggered it.
//! Whether events actually go anywhere is decided once at startup — an
//! unconfigured deployment gets a [`NoopNotifier`], a configured one gets a
//! [`LogNotifier`] writing structured events to the tracing sink.

pub mod config;
pub mod event;
pub mod notifier;

pub use config::AnalyticsConfig;
pub use event::AnalyticsEvent;
pub use notifier::{AnalyticsNotifier, LogNotifier, NoopNotifier, notifier_from_config};
