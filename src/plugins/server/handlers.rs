use std::net::SocketAddr;

use axum::{
  Json,
  extract::{ConnectInfo, Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
  entity::AdKind,
  prelude::*,
  state::AppState,
  sv::{AdStats, AdWithCreative, Creative},
};

#[derive(Serialize)]
pub struct Status {
  success: bool,
  msg: Option<String>,
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      err if err.is_not_found() => StatusCode::NOT_FOUND,
      err if err.is_conflict() => StatusCode::CONFLICT,
      Error::Validation(_) | Error::InvalidArgs(_) => {
        StatusCode::UNPROCESSABLE_ENTITY
      }
      err => {
        error!("Request failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };

    let body = Status { success: false, msg: Some(self.user_message()) };
    (status, Json(body)).into_response()
  }
}

#[derive(Debug, Serialize)]
pub struct ServedAd {
  pub id: i32,
  pub title: String,
  pub kind: AdKind,
  /// Goes through the click counter before reaching the advertiser.
  pub click_url: String,
  pub text: Option<String>,
  pub image_url: Option<String>,
}

impl ServedAd {
  fn new(served: AdWithCreative, media_url: &str) -> Self {
    let (text, image_url) = match served.creative {
      Creative::Text(body) => (Some(body), None),
      Creative::Banner(path) => (None, Some(format!("{media_url}{path}"))),
    };

    Self {
      id: served.ad.id,
      click_url: served.ad.absolute_url(),
      title: served.ad.title,
      kind: served.ad.kind,
      text,
      image_url,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct ServeQuery {
  category: Option<String>,
}

pub async fn health() -> Json<Status> {
  Json(Status { success: true, msg: None })
}

pub async fn serve_ad(
  State(app): State<Arc<AppState>>,
  ConnectInfo(peer): ConnectInfo<SocketAddr>,
  Path(zone): Path<String>,
  Query(query): Query<ServeQuery>,
) -> Result<Response> {
  let sv = app.sv();

  let Some(served) = sv.ad.random_ad(&zone, query.category.as_deref()).await?
  else {
    return Ok(StatusCode::NO_CONTENT.into_response());
  };

  let ip = peer.ip().to_string();
  sv.tracking.record_impression(served.ad.id, Some(&ip)).await?;

  Ok(Json(ServedAd::new(served, &app.config.media_url)).into_response())
}

pub async fn click(
  State(app): State<Arc<AppState>>,
  ConnectInfo(peer): ConnectInfo<SocketAddr>,
  Path(id): Path<i32>,
) -> Result<Redirect> {
  let sv = app.sv();

  let ad = sv.ad.base(id).await?;

  let ip = peer.ip().to_string();
  sv.tracking.record_click(ad.id, Some(&ip)).await?;

  Ok(Redirect::to(&ad.url))
}

pub async fn stats(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
) -> Result<Json<AdStats>> {
  Ok(Json(app.sv().tracking.summary(id).await?))
}

#[cfg(test)]
mod tests {
  use axum::{
    Router,
    body::{Body, to_bytes},
    extract::connect_info::MockConnectInfo,
    http::{Request, header},
  };
  use tower::ServiceExt;

  use super::*;
  use crate::{
    config::Config,
    entity::{click, impression, text_ad},
    plugins::server::router,
    sv::{NewAd, test_utils::test_db},
  };

  const PEER: ([u8; 4], u16) = ([203, 0, 113, 7], 51000);

  async fn app() -> (Arc<AppState>, test_db::Fixture) {
    let db = test_db::setup().await;
    let fx = test_db::seed(&db).await;
    let config = Config {
      verify_urls: false,
      media_url: "https://cdn.example.com/media/".into(),
      ..Config::default()
    };
    (Arc::new(AppState::with_db(db, config).unwrap()), fx)
  }

  fn service(app: &Arc<AppState>) -> Router {
    router(app.clone()).layer(MockConnectInfo(SocketAddr::from(PEER)))
  }

  async fn get(app: &Arc<AppState>, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    service(app).oneshot(request).await.unwrap()
  }

  async fn body_json(resp: Response) -> json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    json::from_slice(&bytes).unwrap()
  }

  fn new_ad(fx: &test_db::Fixture) -> NewAd {
    NewAd::new(
      "Spring sale",
      "https://acme.example.com/spring",
      fx.advertiser.id,
      fx.category.id,
      fx.zone.id,
    )
    .enabled(true)
  }

  #[tokio::test]
  async fn test_health() {
    let (app, _) = app().await;

    let resp = get(&app, "/health").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["success"], true);
  }

  #[tokio::test]
  async fn test_serve_records_impression() {
    let (app, fx) = app().await;
    let ad = app.sv().ad.create_text(new_ad(&fx), "Half price").await.unwrap();

    let resp = get(&app, "/api/zones/sidebar/ad").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["id"], ad.ad.id);
    assert_eq!(body["kind"], "text");
    assert_eq!(body["text"], "Half price");
    assert_eq!(body["click_url"], format!("/ads/{}", ad.ad.id));

    let rows = impression::Entity::find().all(&app.db).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ad_id, ad.ad.id);
    assert_eq!(rows[0].source_ip.as_deref(), Some("203.0.113.7"));
  }

  #[tokio::test]
  async fn test_serve_banner_uses_media_url() {
    let (app, fx) = app().await;
    app.sv().ad.create_banner(new_ad(&fx), "spring.png").await.unwrap();

    let body = body_json(get(&app, "/api/zones/sidebar/ad").await).await;

    assert_eq!(body["kind"], "banner");
    assert_eq!(
      body["image_url"],
      "https://cdn.example.com/media/adzone/bannerads/spring.png"
    );
    assert!(body["text"].is_null());
  }

  #[tokio::test]
  async fn test_serve_empty_zone() {
    let (app, _) = app().await;

    let resp = get(&app, "/api/zones/sidebar/ad").await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(impression::Entity::find().count(&app.db).await.unwrap(), 0);
  }

  #[tokio::test]
  async fn test_serve_unknown_lookups() {
    let (app, _) = app().await;

    let resp = get(&app, "/api/zones/header/ad").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["msg"], "Zone not found");

    let resp = get(&app, "/api/zones/sidebar/ad?category=cars").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn test_click_redirects_and_counts() {
    let (app, fx) = app().await;
    let ad = app.sv().ad.create_text(new_ad(&fx), "Half price").await.unwrap();

    let resp = get(&app, &ad.ad.absolute_url()).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
      resp.headers()[header::LOCATION],
      "https://acme.example.com/spring"
    );

    let rows = click::Entity::find().all(&app.db).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ad_id, ad.ad.id);
  }

  #[tokio::test]
  async fn test_click_ignores_creative() {
    let (app, fx) = app().await;
    let ad = app.sv().ad.create_text(new_ad(&fx), "Half price").await.unwrap();
    text_ad::Entity::delete_by_id(ad.ad.id).exec(&app.db).await.unwrap();

    let resp = get(&app, &ad.ad.absolute_url()).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(click::Entity::find().count(&app.db).await.unwrap(), 1);
  }

  #[tokio::test]
  async fn test_error_status_codes() {
    let cases = [
      (
        Error::SlugTaken("sports".into()),
        StatusCode::CONFLICT,
        "Slug `sports` is already taken",
      ),
      (
        Error::AccountTaken,
        StatusCode::CONFLICT,
        "Account already owns an advertiser",
      ),
      (
        Error::Validation(Invalid::Slug("a b".into())),
        StatusCode::UNPROCESSABLE_ENTITY,
        "`a b` is not a valid slug",
      ),
      (
        Error::InvalidArgs("stop_showing must be after start_showing".into()),
        StatusCode::UNPROCESSABLE_ENTITY,
        "stop_showing must be after start_showing",
      ),
      (
        Error::Internal("pool closed".into()),
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal error",
      ),
    ];

    for (err, status, msg) in cases {
      let resp = err.into_response();
      assert_eq!(resp.status(), status);
      assert_eq!(body_json(resp).await["msg"], msg);
    }
  }

  #[tokio::test]
  async fn test_click_unknown_ad() {
    let (app, _) = app().await;

    let resp = get(&app, "/ads/404").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(click::Entity::find().count(&app.db).await.unwrap(), 0);
  }

  #[tokio::test]
  async fn test_stats() {
    let (app, fx) = app().await;
    let ad = app.sv().ad.create_text(new_ad(&fx), "Half price").await.unwrap();

    get(&app, "/api/zones/sidebar/ad").await;
    get(&app, "/api/zones/sidebar/ad").await;
    get(&app, &ad.ad.absolute_url()).await;

    let resp = get(&app, &format!("/api/ads/{}/stats", ad.ad.id)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["impressions"], 2);
    assert_eq!(body["clicks"], 1);
    assert_eq!(body["click_through_rate"], 0.5);
  }
}
