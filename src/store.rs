use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, Order, QueryOrder, Set,
    sea_query::Expr,
};

use crate::{
    entities::movie,
    models::{MovieUpdate, NewMovie},
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Newest first. Rows sharing a creation instant fall back to insertion order.
    pub async fn list(&self) -> Result<Vec<movie::Model>, DbErr> {
        movie::Entity::find()
            .order_by_desc(movie::Column::CreatedAt)
            .order_by(Expr::cust("rowid"), Order::Desc)
            .all(&self.db)
            .await
    }

    pub async fn create(&self, new: NewMovie) -> Result<movie::Model, DbErr> {
        let now = now_micros();
        let model = movie::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            title: Set(new.title.unwrap_or_default()),
            year: Set(new.year.filter(|y| *y != 0)),
            genre: Set(new.genre.unwrap_or_default()),
            watched: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model.insert(&self.db).await
    }

    /// Returns `None` when no record has this id.
    pub async fn update(
        &self,
        id: &str,
        update: MovieUpdate,
    ) -> Result<Option<movie::Model>, DbErr> {
        let Some(existing) = movie::Entity::find_by_id(id.to_string()).one(&self.db).await? else {
            return Ok(None);
        };
        self.apply(existing, update).await
    }

    /// A row deleted between the read and the write also yields `None`.
    async fn apply(
        &self,
        existing: movie::Model,
        update: MovieUpdate,
    ) -> Result<Option<movie::Model>, DbErr> {
        let updated_at = now_micros().max(existing.updated_at + 1);
        let mut model = existing.into_active_model();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(year) = update.year {
            model.year = Set(year);
        }
        if let Some(genre) = update.genre {
            model.genre = Set(genre);
        }
        if let Some(watched) = update.watched {
            model.watched = Set(watched);
        }
        model.updated_at = Set(updated_at);

        match model.update(&self.db).await {
            Ok(row) => Ok(Some(row)),
            Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Returns `false` when no record has this id.
    pub async fn delete(&self, id: &str) -> Result<bool, DbErr> {
        let res = movie::Entity::delete_by_id(id.to_string()).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

fn now_micros() -> i64 {
    jiff::Timestamp::now().as_microsecond()
}
