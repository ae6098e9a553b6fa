use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub genre: String,
    pub watched: bool,
    /// Microseconds since the Unix epoch.
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        match &self.title {
            ActiveValue::Set(title) | ActiveValue::Unchanged(title) => {
                if title.trim().is_empty() {
                    return Err(DbErr::Custom(
                        "Movie validation failed: title is required".to_string(),
                    ));
                }
            },
            ActiveValue::NotSet if insert => {
                return Err(DbErr::Custom(
                    "Movie validation failed: title is required".to_string(),
                ));
            },
            ActiveValue::NotSet => {},
        }

        if let (
            ActiveValue::Set(created) | ActiveValue::Unchanged(created),
            ActiveValue::Set(updated) | ActiveValue::Unchanged(updated),
        ) = (&self.created_at, &self.updated_at)
        {
            if updated < created {
                return Err(DbErr::Custom(
                    "Movie validation failed: updatedAt precedes createdAt".to_string(),
                ));
            }
        }

        Ok(self)
    }
}
