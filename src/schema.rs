//! DDL for the BlockbusterBase tables, derived from the entity definitions.

use entity::prelude::*;
use sea_orm::{ConnectionTrait, EntityTrait, Schema};

use crate::Result;

/// Create every table that does not exist yet, parents before children so
/// the foreign keys resolve.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    create_table(db, Studio).await?;
    create_table(db, Director).await?;
    create_table(db, Actor).await?;
    create_table(db, Movie).await?;
    create_table(db, StreamingPlatform).await?;
    create_table(db, MovieStudio).await?;
    create_table(db, MovieDirector).await?;
    create_table(db, MovieActor).await?;
    create_table(db, MovieStreaming).await?;
    create_table(db, Review).await?;
    create_table(db, BoxOffice).await?;
    create_table(db, Award).await?;
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(entity);
    stmt.if_not_exists();

    tracing::debug!(table = %entity.table_name(), "creating table");
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}
