use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

const PRAGMAS: &[&str] = &["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"];

pub async fn connect_and_migrate(
    options: impl Into<ConnectOptions>,
) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;

    for pragma in PRAGMAS {
        db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string())).await?;
    }

    Migrator::up(&db, None).await?;
    tracing::debug!("movie schema is up to date");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectOptions, EntityTrait};

    use super::*;
    use crate::entities::movie;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = connect_and_migrate(opts).await.unwrap();

        Migrator::up(&db, None).await.unwrap();
        assert!(movie::Entity::find().all(&db).await.unwrap().is_empty());
    }
}
