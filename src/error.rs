use sea_orm::{DbErr, SqlErr};

/// Field-level validation failures.
#[derive(Debug, thiserror::Error)]
pub enum Invalid {
  #[error("`{0}` is not a valid URL")]
  Url(String),
  #[error("`{0}` does not respond")]
  UrlUnreachable(String),
  #[error("{0} is required")]
  Required(&'static str),
  #[error("{field} is longer than {max} characters")]
  TooLong { field: &'static str, max: usize },
  #[error("`{0}` is not a valid slug")]
  Slug(String),
  #[error("`{0}` is not a valid IP address")]
  Ip(String),
  #[error("`{0}` is not a valid banner path")]
  BannerPath(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("database error: {0}")]
  Db(#[from] DbErr),

  #[error("user not found")]
  UserNotFound,
  #[error("advertiser not found")]
  AdvertiserNotFound,
  #[error("category not found")]
  CategoryNotFound,
  #[error("zone not found")]
  ZoneNotFound,
  #[error("ad not found")]
  AdNotFound,

  #[error("validation failed: {0}")]
  Validation(#[from] Invalid),

  #[error("slug `{0}` is already taken")]
  SlugTaken(String),
  #[error("username `{0}` is already taken")]
  UsernameTaken(String),
  #[error("account already owns an advertiser")]
  AccountTaken,

  #[error("invalid arguments: {0}")]
  InvalidArgs(String),
  #[error("internal error: {0}")]
  Internal(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  /// Maps a unique-constraint failure to `conflict`. Two concurrent creates
  /// can both pass the lookup before either inserts.
  pub(crate) fn or_conflict(
    err: DbErr,
    conflict: impl FnOnce() -> Error,
  ) -> Error {
    match err.sql_err() {
      Some(SqlErr::UniqueConstraintViolation(_)) => conflict(),
      _ => Error::Db(err),
    }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      Error::UserNotFound
        | Error::AdvertiserNotFound
        | Error::CategoryNotFound
        | Error::ZoneNotFound
        | Error::AdNotFound
    )
  }

  pub fn is_conflict(&self) -> bool {
    matches!(
      self,
      Error::SlugTaken(_) | Error::UsernameTaken(_) | Error::AccountTaken
    )
  }

  /// Message safe to hand back to a caller; storage details stay in logs.
  pub fn user_message(&self) -> String {
    match self {
      Error::Db(_) | Error::Internal(_) => "Internal error".into(),
      Error::Validation(invalid) => invalid.to_string(),
      Error::InvalidArgs(msg) => msg.clone(),
      other => {
        let mut msg = other.to_string();
        if let Some(first) = msg.get_mut(0..1) {
          first.make_ascii_uppercase();
        }
        msg
      }
    }
  }
}
