//! Populates the BlockbusterBase schema with random rows whose foreign keys
//! always point at rows that exist.
//!
//! A run inserts the independent entities first, reads their identifiers
//! back, and only then fans out the junction and fact rows that reference
//! them. Everything happens inside one transaction: any failed write rolls
//! the whole batch back.

pub mod fake;
mod fan_out;

pub use fan_out::{pick_links, FanOutPolicy};

use chrono::{NaiveDate, Utc};
use entity::{
    actor, award, box_office, director, movie, movie_actor, movie_director, movie_streaming,
    movie_studio, prelude::*, review, streaming_platform, studio,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityName, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::{fmt, ops::RangeInclusive};
use tracing::{debug, info, instrument};

use crate::{Error, Result};

pub const DEFAULT_RECORD_COUNT: usize = 3000;
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Upserted by name on every run.
pub const PLATFORMS: [&str; 6] = [
    "Netflix",
    "Amazon Prime",
    "Disney+",
    "HBO Max",
    "Apple TV",
    "Hulu",
];

pub const GENRES: [Genre; 7] = [
    Genre::Action,
    Genre::Comedy,
    Genre::Drama,
    Genre::Horror,
    Genre::SciFi,
    Genre::Romance,
    Genre::Thriller,
];

pub const AWARD_NAMES: [AwardName; 5] = [
    AwardName::Oscar,
    AwardName::GoldenGlobe,
    AwardName::Bafta,
    AwardName::Cannes,
    AwardName::CriticsChoice,
];

pub const DIRECTOR_AGES: RangeInclusive<u32> = 25..=80;
pub const ACTOR_AGES: RangeInclusive<u32> = 18..=80;
pub const FOUNDED_YEARS: RangeInclusive<i32> = 1900..=2023;
pub const RELEASE_YEARS: RangeInclusive<i32> = 1950..=2023;
pub const AWARD_YEARS: RangeInclusive<i32> = 1950..=2023;
// Budget and revenue are drawn independently; revenue can land below budget.
pub const BUDGET: RangeInclusive<i64> = 1_000_000..=300_000_000;
pub const REVENUE: RangeInclusive<i64> = 5_000_000..=3_000_000_000;
pub const DOMESTIC_REVENUE: RangeInclusive<i64> = 1_000_000..=500_000_000;
pub const INTERNATIONAL_REVENUE: RangeInclusive<i64> = 1_000_000..=1_500_000_000;
pub const RATING_MIN: f64 = 1.0;
pub const RATING_MAX: f64 = 10.0;

pub const ACTORS_PER_MOVIE: RangeInclusive<usize> = 1..=5;
pub const PLATFORMS_PER_MOVIE: RangeInclusive<usize> = 1..=3;
pub const REVIEWS_PER_MOVIE: RangeInclusive<usize> = 1..=5;
pub const AWARDS_PER_MOVIE: RangeInclusive<usize> = 0..=3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Rows per independent entity (studios, directors, actors, movies).
    pub record_count: usize,
    /// Fixes the random stream; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub fan_out: FanOutPolicy,
    /// Rows per multi-row `INSERT`.
    pub batch_size: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            record_count: DEFAULT_RECORD_COUNT,
            seed: None,
            fan_out: FanOutPolicy::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Rows written per table by one run. Link counts are rows actually
/// inserted, after duplicate pairs were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    pub studios: u64,
    pub directors: u64,
    pub actors: u64,
    pub movies: u64,
    pub platforms_added: u64,
    pub studio_links: u64,
    pub director_links: u64,
    pub actor_links: u64,
    pub streaming_links: u64,
    pub reviews: u64,
    pub box_office: u64,
    pub awards: u64,
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} movies, {} studios, {} directors, {} actors, {} new platforms; \
             {} studio links, {} director links, {} actor links, {} streaming links, \
             {} reviews, {} box office rows, {} awards",
            self.movies,
            self.studios,
            self.directors,
            self.actors,
            self.platforms_added,
            self.studio_links,
            self.director_links,
            self.actor_links,
            self.streaming_links,
            self.reviews,
            self.box_office,
            self.awards,
        )
    }
}

/// Identifiers read back after the independent entities were written.
#[derive(Debug, Default)]
struct IdPools {
    /// Only the movies created by the current run.
    movies: Vec<i32>,
    studios: Vec<i32>,
    directors: Vec<i32>,
    actors: Vec<i32>,
    platforms: Vec<i32>,
}

impl IdPools {
    async fn load<C>(db: &C, movies_after: i32) -> Result<Self>
    where
        C: ConnectionTrait,
    {
        let movies = Movie::find()
            .select_only()
            .column(movie::Column::MovieId)
            .filter(movie::Column::MovieId.gt(movies_after))
            .order_by_asc(movie::Column::MovieId)
            .into_tuple::<i32>()
            .all(db)
            .await?;

        let pools = Self {
            movies,
            studios: ids::<_, Studio>(db, studio::Column::StudioId).await?,
            directors: ids::<_, Director>(db, director::Column::DirectorId).await?,
            actors: ids::<_, Actor>(db, actor::Column::ActorId).await?,
            platforms: ids::<_, StreamingPlatform>(db, streaming_platform::Column::PlatformId)
                .await?,
        };

        if !pools.movies.is_empty() {
            for (table, pool) in [
                ("studios", &pools.studios),
                ("directors", &pools.directors),
                ("actors", &pools.actors),
                ("streaming platforms", &pools.platforms),
            ] {
                if pool.is_empty() {
                    return Err(Error::EmptyPool(table));
                }
            }
        }
        Ok(pools)
    }
}

/// Every primary key of `E`, in insertion order.
async fn ids<C, E>(db: &C, column: E::Column) -> Result<Vec<i32>>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    Ok(E::find()
        .select_only()
        .column(column)
        .order_by_asc(column)
        .into_tuple::<i32>()
        .all(db)
        .await?)
}

async fn last_movie_id<C>(db: &C) -> Result<i32>
where
    C: ConnectionTrait,
{
    let max_id: Option<Option<i32>> = Movie::find()
        .select_only()
        .column_as(Expr::col(movie::Column::MovieId).max(), "max_id")
        .into_tuple()
        .one(db)
        .await?;
    Ok(max_id.flatten().unwrap_or(0))
}

/// Insert `rows` in chunks of `batch_size`, returning the number of rows the
/// database reports as written.
async fn insert_batched<C, A>(
    db: &C,
    rows: Vec<A>,
    batch_size: usize,
    on_conflict: Option<OnConflict>,
) -> Result<u64>
where
    C: ConnectionTrait,
    A: ActiveModelTrait,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    let table = A::Entity::default().table_name().to_owned();
    let mut affected = 0;
    let mut rows = rows.into_iter().peekable();

    while rows.peek().is_some() {
        let batch: Vec<A> = rows.by_ref().take(batch_size.max(1)).collect();
        let len = batch.len();
        let mut insert = A::Entity::insert_many(batch);
        if let Some(on_conflict) = on_conflict.clone() {
            insert = insert.on_conflict(on_conflict);
        }
        affected += insert.exec_without_returning(db).await?;
        debug!(table = %table, rows = len, "inserted batch");
    }
    Ok(affected)
}

fn pair_conflict<C>(movie: C, other: C) -> OnConflict
where
    C: sea_orm::sea_query::IntoIden,
{
    OnConflict::columns([movie, other]).do_nothing().to_owned()
}

#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    rng: StdRng,
    today: NaiveDate,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            today: Utc::now().date_naive(),
        }
    }

    /// Date birthdates are measured against. Defaults to today (UTC).
    pub fn reference_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Run the whole generation as a single transaction and commit it.
    #[instrument(skip_all, fields(records = self.config.record_count))]
    pub async fn run<C>(&mut self, db: &C) -> Result<GenerationSummary>
    where
        C: TransactionTrait,
    {
        let txn = db.begin().await?;
        let summary = self.populate(&txn).await?;
        txn.commit().await?;
        info!("committed: {summary}");
        Ok(summary)
    }

    /// Write every table through `db` without managing a transaction.
    pub async fn populate<C>(&mut self, db: &C) -> Result<GenerationSummary>
    where
        C: ConnectionTrait,
    {
        let mut summary = GenerationSummary {
            studios: self.insert_studios(db).await?,
            directors: self.insert_directors(db).await?,
            actors: self.insert_actors(db).await?,
            ..Default::default()
        };

        let movies_after = last_movie_id(db).await?;
        summary.movies = self.insert_movies(db).await?;
        summary.platforms_added = self.upsert_platforms(db).await?;
        info!(
            studios = summary.studios,
            directors = summary.directors,
            movies = summary.movies,
            actors = summary.actors,
            platforms_added = summary.platforms_added,
            "independent entities written"
        );

        let pools = IdPools::load(db, movies_after).await?;
        debug!(
            movies = pools.movies.len(),
            studios = pools.studios.len(),
            directors = pools.directors.len(),
            actors = pools.actors.len(),
            platforms = pools.platforms.len(),
            "identifiers read back"
        );

        summary.studio_links = self.link_studios(db, &pools).await?;
        summary.director_links = self.link_directors(db, &pools).await?;
        summary.actor_links = self.link_actors(db, &pools).await?;
        summary.streaming_links = self.link_platforms(db, &pools).await?;
        summary.reviews = self.insert_reviews(db, &pools).await?;
        summary.box_office = self.insert_box_office(db, &pools).await?;
        summary.awards = self.insert_awards(db, &pools).await?;
        info!(
            studio_links = summary.studio_links,
            director_links = summary.director_links,
            actor_links = summary.actor_links,
            streaming_links = summary.streaming_links,
            reviews = summary.reviews,
            box_office = summary.box_office,
            awards = summary.awards,
            "dependent rows written"
        );

        Ok(summary)
    }

    async fn insert_studios<C: ConnectionTrait>(&mut self, db: &C) -> Result<u64> {
        let rows: Vec<_> = (0..self.config.record_count)
            .map(|_| studio::ActiveModel {
                name: Set(fake::company(&mut self.rng)),
                founded_year: Set(self.rng.gen_range(FOUNDED_YEARS)),
                location: Set(fake::city(&mut self.rng)),
                ..Default::default()
            })
            .collect();
        insert_batched(db, rows, self.config.batch_size, None).await
    }

    fn person(&mut self, ages: RangeInclusive<u32>) -> (String, NaiveDate, String) {
        (
            fake::person_name(&mut self.rng),
            fake::date_of_birth(&mut self.rng, self.today, ages),
            fake::country(&mut self.rng),
        )
    }

    async fn insert_directors<C: ConnectionTrait>(&mut self, db: &C) -> Result<u64> {
        let rows: Vec<_> = (0..self.config.record_count)
            .map(|_| {
                let (name, birthdate, nationality) = self.person(DIRECTOR_AGES);
                director::ActiveModel {
                    name: Set(name),
                    birthdate: Set(birthdate),
                    nationality: Set(nationality),
                    ..Default::default()
                }
            })
            .collect();
        insert_batched(db, rows, self.config.batch_size, None).await
    }

    async fn insert_actors<C: ConnectionTrait>(&mut self, db: &C) -> Result<u64> {
        let rows: Vec<_> = (0..self.config.record_count)
            .map(|_| {
                let (name, birthdate, nationality) = self.person(ACTOR_AGES);
                actor::ActiveModel {
                    name: Set(name),
                    birthdate: Set(birthdate),
                    nationality: Set(nationality),
                    ..Default::default()
                }
            })
            .collect();
        insert_batched(db, rows, self.config.batch_size, None).await
    }

    async fn insert_movies<C: ConnectionTrait>(&mut self, db: &C) -> Result<u64> {
        let rows: Vec<_> = (0..self.config.record_count)
            .map(|_| movie::ActiveModel {
                title: Set(fake::sentence(&mut self.rng, 3)),
                genre: Set(GENRES[self.rng.gen_range(0..GENRES.len())]),
                release_year: Set(self.rng.gen_range(RELEASE_YEARS)),
                budget: Set(self.rng.gen_range(BUDGET)),
                revenue: Set(self.rng.gen_range(REVENUE)),
                ..Default::default()
            })
            .collect();
        insert_batched(db, rows, self.config.batch_size, None).await
    }

    async fn upsert_platforms<C: ConnectionTrait>(&mut self, db: &C) -> Result<u64> {
        let rows: Vec<_> = PLATFORMS
            .iter()
            .map(|name| streaming_platform::ActiveModel {
                name: Set((*name).to_owned()),
                ..Default::default()
            })
            .collect();
        let on_conflict = OnConflict::column(streaming_platform::Column::Name)
            .do_nothing()
            .to_owned();
        insert_batched(db, rows, self.config.batch_size, Some(on_conflict)).await
    }

    async fn link_studios<C: ConnectionTrait>(&mut self, db: &C, pools: &IdPools) -> Result<u64> {
        let mut rows = Vec::with_capacity(pools.movies.len());
        for &movie_id in &pools.movies {
            for studio_id in pick_links(&mut self.rng, &pools.studios, 1..=1, self.config.fan_out)
            {
                rows.push(movie_studio::ActiveModel {
                    movie_id: Set(movie_id),
                    studio_id: Set(studio_id),
                });
            }
        }
        let on_conflict = pair_conflict(
            movie_studio::Column::MovieId,
            movie_studio::Column::StudioId,
        );
        insert_batched(db, rows, self.config.batch_size, Some(on_conflict)).await
    }

    async fn link_directors<C: ConnectionTrait>(
        &mut self,
        db: &C,
        pools: &IdPools,
    ) -> Result<u64> {
        let mut rows = Vec::with_capacity(pools.movies.len());
        for &movie_id in &pools.movies {
            for director_id in
                pick_links(&mut self.rng, &pools.directors, 1..=1, self.config.fan_out)
            {
                rows.push(movie_director::ActiveModel {
                    movie_id: Set(movie_id),
                    director_id: Set(director_id),
                });
            }
        }
        let on_conflict = pair_conflict(
            movie_director::Column::MovieId,
            movie_director::Column::DirectorId,
        );
        insert_batched(db, rows, self.config.batch_size, Some(on_conflict)).await
    }

    async fn link_actors<C: ConnectionTrait>(&mut self, db: &C, pools: &IdPools) -> Result<u64> {
        let mut rows = Vec::new();
        for &movie_id in &pools.movies {
            for actor_id in pick_links(
                &mut self.rng,
                &pools.actors,
                ACTORS_PER_MOVIE,
                self.config.fan_out,
            ) {
                rows.push(movie_actor::ActiveModel {
                    movie_id: Set(movie_id),
                    actor_id: Set(actor_id),
                });
            }
        }
        let on_conflict = pair_conflict(movie_actor::Column::MovieId, movie_actor::Column::ActorId);
        insert_batched(db, rows, self.config.batch_size, Some(on_conflict)).await
    }

    async fn link_platforms<C: ConnectionTrait>(
        &mut self,
        db: &C,
        pools: &IdPools,
    ) -> Result<u64> {
        let mut rows = Vec::new();
        for &movie_id in &pools.movies {
            for platform_id in pick_links(
                &mut self.rng,
                &pools.platforms,
                PLATFORMS_PER_MOVIE,
                self.config.fan_out,
            ) {
                rows.push(movie_streaming::ActiveModel {
                    movie_id: Set(movie_id),
                    platform_id: Set(platform_id),
                });
            }
        }
        let on_conflict = pair_conflict(
            movie_streaming::Column::MovieId,
            movie_streaming::Column::PlatformId,
        );
        insert_batched(db, rows, self.config.batch_size, Some(on_conflict)).await
    }

    async fn insert_reviews<C: ConnectionTrait>(
        &mut self,
        db: &C,
        pools: &IdPools,
    ) -> Result<u64> {
        let mut rows = Vec::new();
        for &movie_id in &pools.movies {
            for _ in 0..self.rng.gen_range(REVIEWS_PER_MOVIE) {
                let words = self.rng.gen_range(4..=10);
                rows.push(review::ActiveModel {
                    movie_id: Set(movie_id),
                    rating: Set(fake::rating(&mut self.rng, RATING_MIN, RATING_MAX)),
                    review_text: Set(fake::sentence(&mut self.rng, words)),
                    ..Default::default()
                });
            }
        }
        insert_batched(db, rows, self.config.batch_size, None).await
    }

    async fn insert_box_office<C: ConnectionTrait>(
        &mut self,
        db: &C,
        pools: &IdPools,
    ) -> Result<u64> {
        let rows: Vec<_> = pools
            .movies
            .iter()
            .map(|&movie_id| box_office::ActiveModel {
                movie_id: Set(movie_id),
                domestic_revenue: Set(self.rng.gen_range(DOMESTIC_REVENUE)),
                international_revenue: Set(self.rng.gen_range(INTERNATIONAL_REVENUE)),
            })
            .collect();
        insert_batched(db, rows, self.config.batch_size, None).await
    }

    async fn insert_awards<C: ConnectionTrait>(&mut self, db: &C, pools: &IdPools) -> Result<u64> {
        let mut rows = Vec::new();
        for &movie_id in &pools.movies {
            for _ in 0..self.rng.gen_range(AWARDS_PER_MOVIE) {
                rows.push(award::ActiveModel {
                    name: Set(AWARD_NAMES[self.rng.gen_range(0..AWARD_NAMES.len())]),
                    year: Set(self.rng.gen_range(AWARD_YEARS)),
                    movie_id: Set(movie_id),
                    ..Default::default()
                });
            }
        }
        insert_batched(db, rows, self.config.batch_size, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.record_count, 3000);
        assert_eq!(config.fan_out, FanOutPolicy::Lenient);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn config_fills_missing_fields() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "record_count": 10, "fan_out": "exact" }"#).unwrap();
        assert_eq!(
            config,
            GeneratorConfig {
                record_count: 10,
                fan_out: FanOutPolicy::Exact,
                ..Default::default()
            }
        );
    }

    #[test]
    fn budget_range_sits_below_revenue_range() {
        assert!(BUDGET.start() < REVENUE.start());
        assert!(BUDGET.end() < REVENUE.end());
    }
}
