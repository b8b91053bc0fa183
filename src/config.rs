use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::{info, warn};

use crate::detection::{ClassificationProvider, FixedCatalog, RandomFromCatalog};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionMode {
    Fixed { index: usize },
    Random { seed: Option<u64> },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub templates_dir: String,
    pub static_dir: String,
    pub reply_delay: Duration,
    pub advisory_delay: Duration,
    pub preferences_path: PathBuf,
    pub detection: DetectionMode,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Unparsable values fall back to the default
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        let detection = match lookup("DETECTION_PROVIDER").as_deref().map(str::trim) {
            Some("random") => DetectionMode::Random {
                seed: parsed("DETECTION_SEED"),
            },
            Some("fixed") | None => DetectionMode::Fixed {
                index: parsed("DETECTION_INDEX").unwrap_or(0) as usize,
            },
            Some(other) => {
                warn!("Unknown DETECTION_PROVIDER '{}', using fixed catalog", other);
                DetectionMode::Fixed { index: 0 }
            }
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|v| v.trim().parse::<u16>().ok())
                .unwrap_or(8080),
            templates_dir: lookup("TEMPLATES_DIR").unwrap_or_else(|| "templates".to_string()),
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "./static".to_string()),
            reply_delay: Duration::from_millis(parsed("REPLY_DELAY_MS").unwrap_or(1500)),
            advisory_delay: Duration::from_millis(parsed("ADVISORY_DELAY_MS").unwrap_or(2000)),
            preferences_path: lookup("PREFERENCES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/preferences.json")),
            detection,
        }
    }

    pub fn classification_provider(&self) -> Box<dyn ClassificationProvider> {
        let provider: Box<dyn ClassificationProvider> = match self.detection {
            DetectionMode::Fixed { index } => Box::new(FixedCatalog::new(index)),
            DetectionMode::Random { seed: Some(seed) } => Box::new(RandomFromCatalog::seeded(seed)),
            DetectionMode::Random { seed: None } => Box::new(RandomFromCatalog::from_entropy()),
        };
        info!("Using '{}' classification provider", provider.name());
        provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.reply_delay, Duration::from_millis(1500));
        assert_eq!(cfg.advisory_delay, Duration::from_millis(2000));
        assert_eq!(cfg.detection, DetectionMode::Fixed { index: 0 });
    }

    #[test]
    fn overrides_and_bad_numbers() {
        let cfg = config(&[
            ("PORT", "9000"),
            ("REPLY_DELAY_MS", "0"),
            ("ADVISORY_DELAY_MS", "soon"),
            ("DETECTION_PROVIDER", "random"),
            ("DETECTION_SEED", "42"),
        ]);
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.reply_delay, Duration::ZERO);
        assert_eq!(cfg.advisory_delay, Duration::from_millis(2000));
        assert_eq!(cfg.detection, DetectionMode::Random { seed: Some(42) });
        assert_eq!(cfg.classification_provider().name(), "random");
    }

    #[test]
    fn unknown_provider_uses_fixed() {
        let cfg = config(&[("DETECTION_PROVIDER", "neural")]);
        assert_eq!(cfg.detection, DetectionMode::Fixed { index: 0 });
    }
}
