use std::{env, str::FromStr};

use anyhow::{Context, bail};

use crate::prelude::Duration;

#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  pub port: u16,
  /// Request every ad/advertiser URL before saving it.
  pub verify_urls: bool,
  pub verify_timeout: Duration,
  /// Prefix for stored banner paths when building image URLs.
  pub media_url: String,
  /// Sustained requests per second allowed from one client IP.
  pub rate_per_second: u32,
  pub rate_burst: u32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_url: "sqlite:adzone.db?mode=rwc".into(),
      port: 3000,
      verify_urls: true,
      verify_timeout: Duration::from_secs(5),
      media_url: "/media/".into(),
      rate_per_second: 5,
      rate_burst: 100,
    }
  }
}

impl Config {
  pub fn from_env() -> anyhow::Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Interval at which the rate limiter refills one request.
  pub fn rate_period(&self) -> Duration {
    Duration::from_secs(1) / self.rate_per_second.max(1)
  }

  fn from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
  ) -> anyhow::Result<Self> {
    let defaults = Self::default();
    let verify_timeout_secs = parse(&lookup, "VERIFY_TIMEOUT_SECS")?
      .unwrap_or(defaults.verify_timeout.as_secs());

    let rate_per_second = parse(&lookup, "RATE_PER_SECOND")?
      .unwrap_or(defaults.rate_per_second);
    if rate_per_second == 0 {
      bail!("RATE_PER_SECOND must be at least 1");
    }

    let mut media_url = lookup("MEDIA_URL").unwrap_or(defaults.media_url);
    if !media_url.ends_with('/') {
      media_url.push('/');
    }

    Ok(Self {
      database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
      port: parse(&lookup, "PORT")?.unwrap_or(defaults.port),
      verify_urls: match lookup("VERIFY_URLS") {
        Some(raw) => flag(&raw).context("VERIFY_URLS")?,
        None => defaults.verify_urls,
      },
      verify_timeout: Duration::from_secs(verify_timeout_secs),
      media_url,
      rate_per_second,
      rate_burst: parse(&lookup, "RATE_BURST")?.unwrap_or(defaults.rate_burst),
    })
  }
}

fn parse<T>(
  lookup: &impl Fn(&str) -> Option<String>,
  key: &str,
) -> anyhow::Result<Option<T>>
where
  T: FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  lookup(key)
    .map(|raw| raw.trim().parse::<T>())
    .transpose()
    .with_context(|| format!("{key} has an invalid value"))
}

fn flag(raw: &str) -> anyhow::Result<bool> {
  match raw.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Ok(true),
    "0" | "false" | "no" | "off" => Ok(false),
    other => bail!("expected a boolean, got `{other}`"),
  }
}
