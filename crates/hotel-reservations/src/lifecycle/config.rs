//! Runtime settings for [`HotelSystem`](super::HotelSystem).

use crate::notifier::MailConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the system needs to start.
///
/// | Field | Default | Environment |
/// |-------|---------|-------------|
/// | `actor_buffer` | 32 | `HOTEL_ACTOR_BUFFER` |
/// | `notification_capacity` | 64 | `HOTEL_NOTIFY_QUEUE` |
/// | `notification_timeout` | 10 s | `HOTEL_NOTIFY_TIMEOUT_MS` |
/// | `mail.sender_address` | `reservations@localhost` | `HOTEL_MAIL_FROM` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelConfig {
    /// Request channel capacity of each actor.
    pub actor_buffer: usize,
    /// Messages the notification queue holds before senders start waiting
    /// on background tasks.
    pub notification_capacity: usize,
    /// Upper bound on a single notifier call.
    pub notification_timeout: Duration,
    pub mail: MailConfig,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            actor_buffer: 32,
            notification_capacity: 64,
            notification_timeout: Duration::from_secs(10),
            mail: MailConfig::default(),
        }
    }
}

impl HotelConfig {
    /// Defaults overridden by any `HOTEL_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(buffer) = parse_positive(&lookup, "HOTEL_ACTOR_BUFFER")? {
            config.actor_buffer = buffer;
        }
        if let Some(capacity) = parse_positive(&lookup, "HOTEL_NOTIFY_QUEUE")? {
            config.notification_capacity = capacity;
        }
        if let Some(millis) = parse_positive(&lookup, "HOTEL_NOTIFY_TIMEOUT_MS")? {
            config.notification_timeout = Duration::from_millis(millis);
        }
        if let Some(from) = lookup("HOTEL_MAIL_FROM") {
            if !from.contains('@') {
                return Err(ConfigError::Invalid {
                    key: "HOTEL_MAIL_FROM",
                    value: from,
                    reason: "not an email address".to_string(),
                });
            }
            config.mail.sender_address = from;
        }
        Ok(config)
    }
}

/// Parses a strictly positive number. Tokio channels reject a capacity of zero.
fn parse_positive<N>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<N>, ConfigError>
where
    N: FromStr + PartialOrd + Default,
    N::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let invalid = |reason: String| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason,
    };
    let value = raw.trim().parse::<N>().map_err(|e| invalid(e.to_string()))?;
    if value <= N::default() {
        return Err(invalid("must be greater than zero".to_string()));
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = HotelConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, HotelConfig::default());
        assert_eq!(config.actor_buffer, 32);
        assert_eq!(config.notification_capacity, 64);
        assert_eq!(config.notification_timeout, Duration::from_secs(10));
        assert_eq!(config.mail.subject, "Reservation");
    }

    #[test]
    fn test_variables_override_defaults() {
        let config = HotelConfig::from_lookup(lookup(&[
            ("HOTEL_ACTOR_BUFFER", "8"),
            ("HOTEL_NOTIFY_QUEUE", " 4 "),
            ("HOTEL_NOTIFY_TIMEOUT_MS", "250"),
            ("HOTEL_MAIL_FROM", "front-desk@hotel.test"),
        ]))
        .unwrap();
        assert_eq!(config.actor_buffer, 8);
        assert_eq!(config.notification_capacity, 4);
        assert_eq!(config.notification_timeout, Duration::from_millis(250));
        assert_eq!(config.mail.sender_address, "front-desk@hotel.test");
        assert_eq!(config.mail.sender_name, "ReservationManager");
    }

    #[test]
    fn test_rejects_zero_and_garbage() {
        let err = HotelConfig::from_lookup(lookup(&[("HOTEL_ACTOR_BUFFER", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "HOTEL_ACTOR_BUFFER", .. }));

        let err = HotelConfig::from_lookup(lookup(&[("HOTEL_NOTIFY_QUEUE", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "HOTEL_NOTIFY_QUEUE", .. }));

        let err = HotelConfig::from_lookup(lookup(&[("HOTEL_MAIL_FROM", "nobody")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "HOTEL_MAIL_FROM", .. }));
    }
}
