use std::time::Duration;

use anyhow::{Context, Result, bail};
use platform_client::{ClientSettings, ServiceEndpoints};
use products_hr::DEFAULT_CONCURRENCY;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub endpoints: ServiceEndpoints,
    pub request_timeout: Option<Duration>,
    pub enrich_concurrency: usize,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoints = ServiceEndpoints::from_lookup(&lookup);

        let request_timeout = match lookup("HR_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .context("invalid HR_REQUEST_TIMEOUT_SECS")?;
                if secs == 0 {
                    bail!("HR_REQUEST_TIMEOUT_SECS must be greater than zero");
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let enrich_concurrency = match lookup("HR_ENRICH_CONCURRENCY") {
            Some(raw) => {
                let limit: usize = raw
                    .trim()
                    .parse()
                    .context("invalid HR_ENRICH_CONCURRENCY")?;
                if limit == 0 {
                    bail!("HR_ENRICH_CONCURRENCY must be greater than zero");
                }
                limit
            }
            None => DEFAULT_CONCURRENCY,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Ok(Self {
            endpoints,
            request_timeout,
            enrich_concurrency,
            cors_allowed_origins,
        })
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            timeout: self.request_timeout,
            ..ClientSettings::new(self.endpoints.clone())
        }
    }
}
