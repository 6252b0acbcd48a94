use std::path::PathBuf;
use crate::metrics::MetricsPolicy;
use super::error::ConfigError;

pub const ADMIN_EMAIL_VAR: &str = "TRACKER_ADMIN_EMAIL";
pub const CHANNEL_BUFFER_VAR: &str = "TRACKER_CHANNEL_BUFFER";
pub const SALARY_TARGET_VAR: &str = "TRACKER_SALARY_TARGET";
pub const SEED_FILE_VAR: &str = "TRACKER_SEED_FILE";

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@admin.com";
pub const DEFAULT_CHANNEL_BUFFER: usize = 32;

/// Runtime settings for the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// The account with this email sees and edits every order.
    pub admin_email: String,
    /// Capacity of every actor request channel.
    pub channel_buffer: usize,
    pub policy: MetricsPolicy,
    /// JSON array of order forms created at startup, if set.
    pub seed_file: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
            policy: MetricsPolicy::default(),
            seed_file: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(email) = get(ADMIN_EMAIL_VAR) {
            if !email.contains('@') {
                return Err(ConfigError::InvalidValue {
                    key: ADMIN_EMAIL_VAR,
                    reason: format!("{email:?} is not an email address"),
                });
            }
            config.admin_email = email;
        }

        if let Some(raw) = get(CHANNEL_BUFFER_VAR) {
            let buffer: usize = raw.parse().map_err(|_| ConfigError::InvalidNumber {
                key: CHANNEL_BUFFER_VAR,
                value: raw.clone(),
            })?;
            if buffer == 0 {
                return Err(ConfigError::InvalidValue {
                    key: CHANNEL_BUFFER_VAR,
                    reason: "must be at least 1".to_string(),
                });
            }
            config.channel_buffer = buffer;
        }

        if let Some(raw) = get(SALARY_TARGET_VAR) {
            let target: f64 = raw.parse().map_err(|_| ConfigError::InvalidNumber {
                key: SALARY_TARGET_VAR,
                value: raw.clone(),
            })?;
            if !target.is_finite() || target <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: SALARY_TARGET_VAR,
                    reason: format!("must be a positive amount, got {target}"),
                });
            }
            config.policy = config.policy.with_target(target);
        }

        config.seed_file = get(SEED_FILE_VAR).map(PathBuf::from);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = DashboardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.policy.target, 2300.0);
        assert_eq!(config.admin_email, "admin@admin.com");
    }

    #[test]
    fn test_overrides() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (ADMIN_EMAIL_VAR, "boss@brokerage.com"),
            (CHANNEL_BUFFER_VAR, " 8 "),
            (SALARY_TARGET_VAR, "3000"),
            (SEED_FILE_VAR, "/tmp/orders.json"),
        ]))
        .unwrap();
        assert_eq!(config.admin_email, "boss@brokerage.com");
        assert_eq!(config.channel_buffer, 8);
        assert_eq!(config.policy.target, 3000.0);
        assert_eq!(config.policy.base_bonus, 250.0);
        assert_eq!(config.seed_file, Some(PathBuf::from("/tmp/orders.json")));
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = DashboardConfig::from_lookup(lookup(&[(CHANNEL_BUFFER_VAR, "  ")])).unwrap();
        assert_eq!(config.channel_buffer, DEFAULT_CHANNEL_BUFFER);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        assert_eq!(
            DashboardConfig::from_lookup(lookup(&[(CHANNEL_BUFFER_VAR, "lots")])),
            Err(ConfigError::InvalidNumber { key: CHANNEL_BUFFER_VAR, value: "lots".into() })
        );
        assert!(matches!(
            DashboardConfig::from_lookup(lookup(&[(CHANNEL_BUFFER_VAR, "0")])),
            Err(ConfigError::InvalidValue { key: CHANNEL_BUFFER_VAR, .. })
        ));
        assert!(matches!(
            DashboardConfig::from_lookup(lookup(&[(SALARY_TARGET_VAR, "-10")])),
            Err(ConfigError::InvalidValue { key: SALARY_TARGET_VAR, .. })
        ));
        assert!(matches!(
            DashboardConfig::from_lookup(lookup(&[(ADMIN_EMAIL_VAR, "nobody")])),
            Err(ConfigError::InvalidValue { key: ADMIN_EMAIL_VAR, .. })
        ));
    }
}
