use reqwest::{Client, StatusCode};
use url::Url;

use crate::prelude::*;

/// Checks advertised URLs before they are stored.
///
/// Syntax is always checked. When `verify_exists` is set the URL is also
/// requested and must answer with a non-error status.
#[derive(Debug, Clone)]
pub struct UrlVerifier {
  verify_exists: bool,
  client: Client,
}

impl UrlVerifier {
  pub fn new(verify_exists: bool, timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .timeout(timeout)
      .user_agent(concat!("adzone/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| {
        Error::Internal(format!("Failed to build HTTP client: {e}"))
      })?;

    Ok(Self { verify_exists, client })
  }

  pub fn verify_exists(&self) -> bool {
    self.verify_exists
  }

  pub async fn check(&self, raw: &str) -> Result<Url> {
    let url = parse(raw)?;

    if self.verify_exists {
      self.probe(&url).await?;
    }

    Ok(url)
  }

  async fn probe(&self, url: &Url) -> Result<()> {
    let unreachable = || Invalid::UrlUnreachable(url.to_string());

    let mut status = match self.client.head(url.clone()).send().await {
      Ok(resp) => resp.status(),
      Err(err) => {
        warn!("URL check for {url} failed: {err}");
        return Err(unreachable().into());
      }
    };

    // some servers refuse HEAD outright
    if status == StatusCode::METHOD_NOT_ALLOWED {
      status = self
        .client
        .get(url.clone())
        .send()
        .await
        .map_err(|err| {
          warn!("URL check for {url} failed: {err}");
          unreachable()
        })?
        .status();
    }

    if status.is_client_error() || status.is_server_error() {
      warn!("URL check for {url} answered {status}");
      return Err(unreachable().into());
    }

    Ok(())
  }
}

/// Accepts absolute `http`/`https` URLs with a host.
pub fn parse(raw: &str) -> Result<Url> {
  let raw = raw.trim();
  let invalid = || Error::from(Invalid::Url(raw.to_string()));

  let url = Url::parse(raw).map_err(|_| invalid())?;
  if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
    return Err(invalid());
  }

  Ok(url)
}

#[cfg(test)]
mod tests {
  use std::net::SocketAddr;

  use axum::{Router, http::StatusCode as Status, routing::get};

  use super::*;

  async fn spawn_site() -> SocketAddr {
    let router = Router::new()
      .route("/", get(|| async { "welcome" }))
      .route("/gone", get(|| async { Status::GONE }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, router).await.unwrap();
    });
    addr
  }

  #[test]
  fn test_parse() {
    assert_eq!(
      parse(" https://example.com/landing ").unwrap().as_str(),
      "https://example.com/landing"
    );
    assert!(parse("example.com").is_err());
    assert!(parse("ftp://example.com").is_err());
    assert!(parse("mailto:ads@example.com").is_err());
  }

  #[tokio::test]
  async fn test_syntax_only_when_verification_disabled() {
    let verifier = UrlVerifier::new(false, Duration::from_secs(1)).unwrap();
    let url = verifier.check("http://127.0.0.1:1/nothing").await.unwrap();
    assert_eq!(url.port(), Some(1));
  }

  #[tokio::test]
  async fn test_verification_hits_the_site() {
    let addr = spawn_site().await;
    let verifier = UrlVerifier::new(true, Duration::from_secs(2)).unwrap();

    assert!(verifier.check(&format!("http://{addr}/")).await.is_ok());
    assert!(matches!(
      verifier.check(&format!("http://{addr}/gone")).await,
      Err(Error::Validation(Invalid::UrlUnreachable(_)))
    ));
    assert!(matches!(
      verifier.check(&format!("http://{addr}/missing")).await,
      Err(Error::Validation(Invalid::UrlUnreachable(_)))
    ));
  }

  #[tokio::test]
  async fn test_verification_rejects_refused_connections() {
    let verifier = UrlVerifier::new(true, Duration::from_secs(1)).unwrap();
    assert!(matches!(
      verifier.check("http://127.0.0.1:1/").await,
      Err(Error::Validation(Invalid::UrlUnreachable(_)))
    ));
  }
}
