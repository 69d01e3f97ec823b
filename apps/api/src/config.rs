use anyhow::{bail, Context, Result};

/// Largest number of decimal places an f64 score can meaningfully carry.
pub const MAX_SCORE_PRECISION: u32 = 15;

/// Application configuration loaded from environment variables.
/// Every variable is optional; startup fails only on unparseable values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Decimal places scores are rounded to before they are sorted and returned.
    pub score_precision: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            rust_log: "info".to_string(),
            score_precision: 6,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            Err(_) => defaults.port,
        };

        let score_precision = match std::env::var("SCORE_PRECISION") {
            Ok(raw) => parse_precision(&raw)?,
            Err(_) => defaults.score_precision,
        };

        Ok(Config {
            port,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            score_precision,
        })
    }
}

fn parse_precision(raw: &str) -> Result<u32> {
    let precision = raw
        .trim()
        .parse::<u32>()
        .with_context(|| format!("SCORE_PRECISION must be a non-negative integer, got '{raw}'"))?;
    if precision > MAX_SCORE_PRECISION {
        bail!("SCORE_PRECISION must be at most {MAX_SCORE_PRECISION}, got {precision}");
    }
    Ok(precision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.score_precision, 6);
    }

    #[test]
    fn test_parse_precision_accepts_bounds() {
        assert_eq!(parse_precision("0").unwrap(), 0);
        assert_eq!(parse_precision(" 15 ").unwrap(), 15);
    }

    #[test]
    fn test_parse_precision_rejects_out_of_range() {
        assert!(parse_precision("16").is_err());
        assert!(parse_precision("-1").is_err());
        assert!(parse_precision("six").is_err());
    }
}
