use std::env;
use tracing::warn;

/// Close-call margin (in percentage points) used when classifying a
/// constitution as dual or tridoshic. Tunable via PRAKRITI_CLOSE_THRESHOLD.
pub const DEFAULT_CLOSE_THRESHOLD: u8 = 10;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub close_threshold: u8,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| {
                warn!("PORT not set or invalid, using default {}", DEFAULT_PORT);
                DEFAULT_PORT
            });

        let close_threshold = env::var("PRAKRITI_CLOSE_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|t| *t <= 100)
            .unwrap_or_else(|| {
                warn!(
                    "PRAKRITI_CLOSE_THRESHOLD not set or invalid, using default {}",
                    DEFAULT_CLOSE_THRESHOLD
                );
                DEFAULT_CLOSE_THRESHOLD
            });

        Self {
            port,
            close_threshold,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            close_threshold: DEFAULT_CLOSE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_documented_threshold() {
        let config = AppConfig::default();
        assert_eq!(config.close_threshold, 10);
        assert_eq!(config.port, 3000);
    }
}
