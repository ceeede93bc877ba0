use crate::{entity::user, prelude::*};

pub struct User<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> User<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(&self, username: &str) -> Result<user::Model> {
    let username = crate::utils::required("username", username, 150)?;

    if self.by_username(&username).await?.is_some() {
      return Err(Error::UsernameTaken(username));
    }

    let user = user::ActiveModel {
      username: Set(username.clone()),
      created_at: Set(now()),
      ..Default::default()
    }
    .insert(self.db)
    .await
    .map_err(|err| {
      Error::or_conflict(err, || Error::UsernameTaken(username))
    })?;

    info!("User #{} `{}` created", user.id, user.username);
    Ok(user)
  }

  pub async fn get_or_create(&self, username: &str) -> Result<user::Model> {
    if let Some(user) = self.by_username(username.trim()).await? {
      return Ok(user);
    }
    match self.create(username).await {
      // lost the race to a concurrent create of the same name
      Err(Error::UsernameTaken(name)) => {
        self.by_username(&name).await?.ok_or(Error::UserNotFound)
      }
      other => other,
    }
  }

  pub async fn by_id(&self, id: i32) -> Result<Option<user::Model>> {
    Ok(user::Entity::find_by_id(id).one(self.db).await?)
  }

  pub async fn by_username(
    &self,
    username: &str,
  ) -> Result<Option<user::Model>> {
    let user = user::Entity::find()
      .filter(user::Column::Username.eq(username))
      .one(self.db)
      .await?;
    Ok(user)
  }
}
