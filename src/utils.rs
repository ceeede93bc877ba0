use std::net::IpAddr;

use crate::prelude::*;

pub const MAX_TITLE: usize = 255;
pub const MAX_SLUG: usize = 50;

/// Trims `value` and rejects it when blank or longer than `max` characters.
pub fn required(
  field: &'static str,
  value: &str,
  max: usize,
) -> Result<String> {
  let value = value.trim();
  if value.is_empty() {
    return Err(Invalid::Required(field).into());
  }
  if value.chars().count() > max {
    return Err(Invalid::TooLong { field, max }.into());
  }
  Ok(value.to_string())
}

/// Letters, numbers, underscores and hyphens only.
pub fn slug(value: &str) -> Result<String> {
  let value = required("slug", value, MAX_SLUG)?;
  if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
  {
    return Err(Invalid::Slug(value).into());
  }
  Ok(value)
}

/// Normalizes an optional source address; blank input counts as absent.
pub fn source_ip(value: Option<&str>) -> Result<Option<String>> {
  match value.map(str::trim) {
    None | Some("") => Ok(None),
    Some(raw) => raw
      .parse::<IpAddr>()
      .map(|ip| Some(ip.to_canonical().to_string()))
      .map_err(|_| Invalid::Ip(raw.to_string()).into()),
  }
}

pub fn click_through_rate(impressions: u64, clicks: u64) -> f64 {
  if impressions == 0 {
    0.0
  } else {
    clicks as f64 / impressions as f64
  }
}
