//! Analytics configuration.

/// Runtime configuration for the analytics notifier.
///
/// Consumed once at startup by [`crate::notifier_from_config`]; nothing else
/// reads it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    /// Master switch. Defaults to enabled so a deployment only has to supply
    /// the property id.
    pub enabled: bool,
    /// Destination property identifier events are attributed to.
    pub property_id: String,
    /// Optional path to backend credentials (unused by the log sink, carried
    /// for a real transport).
    pub credentials_path: Option<String>,
}

impl AnalyticsConfig {
    /// Read configuration from `ANALYTICS_ENABLED`, `ANALYTICS_PROPERTY_ID`,
    /// and `ANALYTICS_CREDENTIALS_PATH`.
    pub fn from_env() -> Self {
        let enabled = std::env::var("ANALYTICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        let property_id = std::env::var("ANALYTICS_PROPERTY_ID").unwrap_or_default();
        let credentials_path = std::env::var("ANALYTICS_CREDENTIALS_PATH").ok();

        Self {
            enabled,
            property_id,
            credentials_path,
        }
    }

    /// True only when enabled and a non-empty property id is present.
    pub fn configured(&self) -> bool {
        self.enabled && !self.property_id.trim().is_empty()
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            property_id: String::new(),
            credentials_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_requires_enabled_and_property_id() {
        let config = AnalyticsConfig {
            enabled: true,
            property_id: "G-12345".to_string(),
            credentials_path: None,
        };
        assert!(config.configured());
    }

    #[test]
    fn disabled_is_never_configured() {
        let config = AnalyticsConfig {
            enabled: false,
            property_id: "G-12345".to_string(),
            credentials_path: None,
        };
        assert!(!config.configured());
    }

    #[test]
    fn blank_property_id_is_not_configured() {
        let config = AnalyticsConfig {
            enabled: true,
            property_id: "   ".to_string(),
            credentials_path: None,
        };
        assert!(!config.configured());
        assert!(!AnalyticsConfig::default().configured());
    }
}
