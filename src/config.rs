//! Runtime configuration read from the environment

use rand::Rng;
use std::{env, net::IpAddr, time::Duration};

#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address (default: 127.0.0.1)
    pub host: IpAddr,
    /// Server port (default: 8080)
    pub port: u16,
    /// Log level used when RUST_LOG is unset (default: info)
    pub log_level: String,
    /// Artificial delay for simulated round-trips in milliseconds (default: 0)
    pub simulated_latency_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(IpAddr::from([127, 0, 0, 1])),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            simulated_latency_ms: env::var("SIMULATED_LATENCY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }

    /// Delay to wait before answering a simulated call. Up to twice the
    /// configured base latency, zero when latency is disabled.
    pub fn simulated_delay(&self) -> Duration {
        if self.simulated_latency_ms == 0 {
            return Duration::ZERO;
        }
        let base = self.simulated_latency_ms;
        let jitter = rand::thread_rng().gen_range(0..=base);
        Duration::from_millis(base.saturating_add(jitter))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(latency: u64) -> Config {
        Config {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            log_level: "info".to_string(),
            simulated_latency_ms: latency,
        }
    }

    #[test]
    fn zero_latency_means_no_delay() {
        assert_eq!(config(0).simulated_delay(), Duration::ZERO);
    }

    #[test]
    fn delay_stays_within_jitter_window() {
        let cfg = config(100);
        for _ in 0..50 {
            let delay = cfg.simulated_delay();
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_millis(200));
        }
    }

    #[test]
    fn huge_latency_saturates_instead_of_overflowing() {
        let delay = config(u64::MAX).simulated_delay();
        assert!(delay >= Duration::from_millis(u64::MAX));
    }
}
