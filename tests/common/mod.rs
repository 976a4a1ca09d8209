#![allow(dead_code)]

use blockbuster::{
    generator::{FanOutPolicy, GenerationSummary, Generator, GeneratorConfig},
    schema,
};
use sea_orm::{Database, DatabaseConnection, EntityTrait};

pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    schema::create_tables(&db).await.unwrap();
    db
}

pub fn config(record_count: usize, seed: u64) -> GeneratorConfig {
    GeneratorConfig {
        record_count,
        seed: Some(seed),
        fan_out: FanOutPolicy::Lenient,
        batch_size: 7,
    }
}

pub async fn seed(db: &DatabaseConnection, config: GeneratorConfig) -> GenerationSummary {
    Generator::new(config).run(db).await.unwrap()
}

pub async fn count<E: EntityTrait>(db: &DatabaseConnection) -> usize {
    E::find().all(db).await.unwrap().len()
}
