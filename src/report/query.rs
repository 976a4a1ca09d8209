//! The aggregate queries behind each dashboard view.
//!
//! Every function takes the connection explicitly and only reads. Ties are
//! broken by label so repeated renders return identical rows. `limit` keeps
//! the first rows in that order; `None` returns them all.

use entity::{
    actor, award, box_office, director, movie, movie_actor, movie_director, movie_streaming,
    movie_studio, prelude::*, review, streaming_platform, studio,
};
use sea_orm::{
    sea_query::{Alias, Expr, Func, IntoColumnRef, SimpleExpr},
    ConnectionTrait, DbErr, EntityTrait, FromQueryResult, JoinType, QueryOrder, QuerySelect,
    RelationDef, RelationTrait,
};
use serde::Serialize;

const MOVIE_COUNT: &str = "movie_count";
const TOTAL_REVENUE: &str = "total_revenue";
const AVG_REVENUE: &str = "avg_revenue";
const AVG_RATING: &str = "avg_rating";
const AWARD_COUNT: &str = "award_count";

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct MovieRevenue {
    pub movie_id: i32,
    pub title: String,
    pub total_revenue: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct GenreCount {
    pub genre: Genre,
    pub movie_count: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct YearCount {
    pub release_year: i32,
    pub movie_count: i64,
}

#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize)]
pub struct GenreRevenue {
    pub genre: Genre,
    pub avg_revenue: f64,
}

/// A director, studio, actor or platform with the number of movies linked
/// to it.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct NamedCount {
    pub id: i32,
    pub name: String,
    pub movie_count: i64,
}

#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize)]
pub struct MovieRating {
    pub movie_id: i32,
    pub title: String,
    pub avg_rating: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct MovieAwards {
    pub movie_id: i32,
    pub title: String,
    pub award_count: i64,
}

/// Refer to a select-list alias, e.g. in `ORDER BY`.
fn alias(name: &'static str) -> SimpleExpr {
    Expr::col(Alias::new(name)).into()
}

fn total_revenue() -> SimpleExpr {
    Expr::col((box_office::Entity, box_office::Column::DomesticRevenue)).add(Expr::col((
        box_office::Entity,
        box_office::Column::InternationalRevenue,
    )))
}

pub async fn top_grossing_movies<C>(db: &C, limit: Option<u64>) -> Result<Vec<MovieRevenue>, DbErr>
where
    C: ConnectionTrait,
{
    Movie::find()
        .select_only()
        .column(movie::Column::MovieId)
        .column(movie::Column::Title)
        .column_as(total_revenue(), TOTAL_REVENUE)
        .join(JoinType::InnerJoin, movie::Relation::BoxOffice.def())
        .order_by_desc(alias(TOTAL_REVENUE))
        .order_by_asc(movie::Column::Title)
        .limit(limit)
        .into_model::<MovieRevenue>()
        .all(db)
        .await
}

pub async fn genre_distribution<C>(db: &C, limit: Option<u64>) -> Result<Vec<GenreCount>, DbErr>
where
    C: ConnectionTrait,
{
    Movie::find()
        .select_only()
        .column(movie::Column::Genre)
        .column_as(Expr::col(movie::Column::MovieId).count(), MOVIE_COUNT)
        .group_by(movie::Column::Genre)
        .order_by_desc(alias(MOVIE_COUNT))
        .order_by_asc(movie::Column::Genre)
        .limit(limit)
        .into_model::<GenreCount>()
        .all(db)
        .await
}

pub async fn releases_per_year<C>(db: &C, limit: Option<u64>) -> Result<Vec<YearCount>, DbErr>
where
    C: ConnectionTrait,
{
    Movie::find()
        .select_only()
        .column(movie::Column::ReleaseYear)
        .column_as(Expr::col(movie::Column::MovieId).count(), MOVIE_COUNT)
        .group_by(movie::Column::ReleaseYear)
        .order_by_asc(movie::Column::ReleaseYear)
        .limit(limit)
        .into_model::<YearCount>()
        .all(db)
        .await
}

pub async fn avg_revenue_per_genre<C>(
    db: &C,
    limit: Option<u64>,
) -> Result<Vec<GenreRevenue>, DbErr>
where
    C: ConnectionTrait,
{
    // Postgres averages integers as NUMERIC; cast so both backends decode f64.
    let avg: SimpleExpr =
        Func::cast_as(Func::avg(total_revenue()), Alias::new("DOUBLE PRECISION")).into();

    Movie::find()
        .select_only()
        .column(movie::Column::Genre)
        .column_as(avg, AVG_REVENUE)
        .join(JoinType::InnerJoin, movie::Relation::BoxOffice.def())
        .group_by(movie::Column::Genre)
        .order_by_desc(alias(AVG_REVENUE))
        .order_by_asc(movie::Column::Genre)
        .limit(limit)
        .into_model::<GenreRevenue>()
        .all(db)
        .await
}

/// Count junction rows per entity of `E`, most linked first.
async fn links_per<C, E, M>(
    db: &C,
    id: E::Column,
    name: E::Column,
    link: RelationDef,
    link_movie: M,
    limit: Option<u64>,
) -> Result<Vec<NamedCount>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
    M: IntoColumnRef,
{
    E::find()
        .select_only()
        .column_as(id, "id")
        .column_as(name, "name")
        .column_as(Expr::col(link_movie).count(), MOVIE_COUNT)
        .join(JoinType::InnerJoin, link)
        .group_by(id)
        .group_by(name)
        .order_by_desc(alias(MOVIE_COUNT))
        .order_by_asc(name)
        .limit(limit)
        .into_model::<NamedCount>()
        .all(db)
        .await
}

pub async fn prolific_directors<C>(db: &C, limit: Option<u64>) -> Result<Vec<NamedCount>, DbErr>
where
    C: ConnectionTrait,
{
    links_per::<_, Director, _>(
        db,
        director::Column::DirectorId,
        director::Column::Name,
        director::Relation::MovieDirector.def(),
        (movie_director::Entity, movie_director::Column::MovieId),
        limit,
    )
    .await
}

pub async fn top_studios<C>(db: &C, limit: Option<u64>) -> Result<Vec<NamedCount>, DbErr>
where
    C: ConnectionTrait,
{
    links_per::<_, Studio, _>(
        db,
        studio::Column::StudioId,
        studio::Column::Name,
        studio::Relation::MovieStudio.def(),
        (movie_studio::Entity, movie_studio::Column::MovieId),
        limit,
    )
    .await
}

pub async fn platform_coverage<C>(db: &C, limit: Option<u64>) -> Result<Vec<NamedCount>, DbErr>
where
    C: ConnectionTrait,
{
    links_per::<_, StreamingPlatform, _>(
        db,
        streaming_platform::Column::PlatformId,
        streaming_platform::Column::Name,
        streaming_platform::Relation::MovieStreaming.def(),
        (movie_streaming::Entity, movie_streaming::Column::MovieId),
        limit,
    )
    .await
}

pub async fn featured_actors<C>(db: &C, limit: Option<u64>) -> Result<Vec<NamedCount>, DbErr>
where
    C: ConnectionTrait,
{
    links_per::<_, Actor, _>(
        db,
        actor::Column::ActorId,
        actor::Column::Name,
        actor::Relation::MovieActor.def(),
        (movie_actor::Entity, movie_actor::Column::MovieId),
        limit,
    )
    .await
}

pub async fn highest_rated_movies<C>(db: &C, limit: Option<u64>) -> Result<Vec<MovieRating>, DbErr>
where
    C: ConnectionTrait,
{
    let avg: SimpleExpr = Func::avg(Expr::col((review::Entity, review::Column::Rating))).into();

    Movie::find()
        .select_only()
        .column(movie::Column::MovieId)
        .column(movie::Column::Title)
        .column_as(avg, AVG_RATING)
        .join(JoinType::InnerJoin, movie::Relation::Review.def())
        .group_by(movie::Column::MovieId)
        .group_by(movie::Column::Title)
        .order_by_desc(alias(AVG_RATING))
        .order_by_asc(movie::Column::Title)
        .limit(limit)
        .into_model::<MovieRating>()
        .all(db)
        .await
}

pub async fn most_awarded_movies<C>(db: &C, limit: Option<u64>) -> Result<Vec<MovieAwards>, DbErr>
where
    C: ConnectionTrait,
{
    Movie::find()
        .select_only()
        .column(movie::Column::MovieId)
        .column(movie::Column::Title)
        .column_as(
            Expr::col((award::Entity, award::Column::AwardId)).count(),
            AWARD_COUNT,
        )
        .join(JoinType::InnerJoin, movie::Relation::Award.def())
        .group_by(movie::Column::MovieId)
        .group_by(movie::Column::Title)
        .order_by_desc(alias(AWARD_COUNT))
        .order_by_asc(movie::Column::Title)
        .limit(limit)
        .into_model::<MovieAwards>()
        .all(db)
        .await
}
