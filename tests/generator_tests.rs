pub mod common;

use std::collections::HashMap;

use blockbuster::{
    entity::{
        actor, director, movie, movie_actor, movie_director, movie_streaming, movie_studio,
        prelude::*, review,
    },
    generator::{fake::age_on, FanOutPolicy, Generator, GeneratorConfig, PLATFORMS},
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use common::{config, count, seed, setup};

/// Number of rows per movie in a junction or fact table.
fn per_movie(movie_ids: impl IntoIterator<Item = i32>) -> HashMap<i32, usize> {
    let mut counts = HashMap::new();
    for id in movie_ids {
        *counts.entry(id).or_default() += 1;
    }
    counts
}

async fn movie_ids(db: &DatabaseConnection) -> Vec<i32> {
    Movie::find()
        .order_by_asc(movie::Column::MovieId)
        .all(db)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.movie_id)
        .collect()
}

#[tokio::test]
async fn seed_fills_every_table() {
    let db = setup().await;
    let summary = seed(&db, config(10, 1)).await;

    assert_eq!(count::<Studio>(&db).await, 10);
    assert_eq!(count::<Director>(&db).await, 10);
    assert_eq!(count::<Actor>(&db).await, 10);
    assert_eq!(count::<Movie>(&db).await, 10);
    assert_eq!(count::<StreamingPlatform>(&db).await, PLATFORMS.len());
    assert_eq!(count::<BoxOffice>(&db).await, 10);
    assert_eq!(count::<MovieStudio>(&db).await, 10);
    assert_eq!(count::<MovieDirector>(&db).await, 10);

    assert_eq!(summary.movies, 10);
    assert_eq!(summary.platforms_added, 6);
    assert_eq!(summary.actor_links as usize, count::<MovieActor>(&db).await);
    assert_eq!(
        summary.streaming_links as usize,
        count::<MovieStreaming>(&db).await
    );
    assert_eq!(summary.reviews as usize, count::<Review>(&db).await);
    assert_eq!(summary.awards as usize, count::<Award>(&db).await);
}

async fn assert_fan_out(db: &DatabaseConnection) {
    let movies = movie_ids(db).await;

    let studios = per_movie(
        MovieStudio::find()
            .all(db)
            .await
            .unwrap()
            .into_iter()
            .map(|l: movie_studio::Model| l.movie_id),
    );
    let directors = per_movie(
        MovieDirector::find()
            .all(db)
            .await
            .unwrap()
            .into_iter()
            .map(|l: movie_director::Model| l.movie_id),
    );
    let actors = per_movie(
        MovieActor::find()
            .all(db)
            .await
            .unwrap()
            .into_iter()
            .map(|l: movie_actor::Model| l.movie_id),
    );
    let platforms = per_movie(
        MovieStreaming::find()
            .all(db)
            .await
            .unwrap()
            .into_iter()
            .map(|l: movie_streaming::Model| l.movie_id),
    );
    let reviews = per_movie(
        Review::find()
            .all(db)
            .await
            .unwrap()
            .into_iter()
            .map(|r: review::Model| r.movie_id),
    );
    let awards = per_movie(
        Award::find()
            .all(db)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.movie_id),
    );

    for id in &movies {
        assert_eq!(studios.get(id), Some(&1), "movie {id} studios");
        assert_eq!(directors.get(id), Some(&1), "movie {id} directors");
        assert!((1..=5).contains(&actors[id]), "movie {id} actors");
        assert!((1..=3).contains(&platforms[id]), "movie {id} platforms");
        assert!((1..=5).contains(&reviews[id]), "movie {id} reviews");
        assert!(awards.get(id).copied().unwrap_or(0) <= 3, "movie {id} awards");
    }
    // Nothing references a movie that does not exist.
    for counts in [&studios, &directors, &actors, &platforms, &reviews, &awards] {
        assert!(counts.keys().all(|id| movies.contains(id)));
    }
}

#[tokio::test]
async fn lenient_fan_out_stays_in_range() {
    let db = setup().await;
    seed(&db, config(25, 2)).await;
    assert_fan_out(&db).await;
}

#[tokio::test]
async fn exact_fan_out_stays_in_range() {
    let db = setup().await;
    seed(
        &db,
        GeneratorConfig {
            fan_out: FanOutPolicy::Exact,
            ..config(25, 3)
        },
    )
    .await;
    assert_fan_out(&db).await;
}

#[tokio::test]
async fn ratings_have_one_decimal() {
    let db = setup().await;
    seed(&db, config(20, 4)).await;

    let reviews = Review::find().all(&db).await.unwrap();
    assert!(!reviews.is_empty());
    for review in reviews {
        assert!((1.0..=10.0).contains(&review.rating), "{}", review.rating);
        let tenths = review.rating * 10.0;
        assert!((tenths - tenths.round()).abs() < 1e-9, "{}", review.rating);
        assert!(!review.review_text.is_empty());
    }
}

#[tokio::test]
async fn budgets_and_years_stay_in_range() {
    let db = setup().await;
    seed(&db, config(20, 5)).await;

    for movie in Movie::find().all(&db).await.unwrap() {
        assert!((1950..=2023).contains(&movie.release_year));
        assert!((1_000_000..=300_000_000).contains(&movie.budget));
        assert!((5_000_000..=3_000_000_000).contains(&movie.revenue));
    }
    for row in BoxOffice::find().all(&db).await.unwrap() {
        assert!(row.total_revenue() >= 2_000_000);
    }
    for award in Award::find().all(&db).await.unwrap() {
        assert!((1950..=2023).contains(&award.year));
    }
}

#[tokio::test]
async fn ages_fall_in_bounds() {
    let db = setup().await;
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    Generator::new(config(200, 6))
        .reference_date(today)
        .run(&db)
        .await
        .unwrap();

    for d in Director::find().all(&db).await.unwrap() {
        let d: director::Model = d;
        assert!((25..=80).contains(&age_on(d.birthdate, today)), "{d:?}");
    }
    for a in Actor::find().all(&db).await.unwrap() {
        let a: actor::Model = a;
        assert!((18..=80).contains(&age_on(a.birthdate, today)), "{a:?}");
    }
}

#[tokio::test]
async fn zero_records_is_a_no_op() {
    let db = setup().await;
    let summary = seed(&db, config(0, 7)).await;

    assert_eq!(summary.movies, 0);
    assert_eq!(summary.actor_links, 0);
    assert_eq!(count::<Movie>(&db).await, 0);
    assert_eq!(count::<Studio>(&db).await, 0);
    assert_eq!(count::<MovieActor>(&db).await, 0);
    assert_eq!(count::<Review>(&db).await, 0);
    // The fixed platform list is still ensured.
    assert_eq!(count::<StreamingPlatform>(&db).await, 6);
}

#[tokio::test]
async fn rerun_appends_without_duplicating_platforms() {
    let db = setup().await;
    seed(&db, config(8, 8)).await;
    let second = seed(&db, config(8, 9)).await;

    assert_eq!(second.platforms_added, 0);
    assert_eq!(second.movies, 8);
    assert_eq!(count::<StreamingPlatform>(&db).await, 6);
    assert_eq!(count::<Movie>(&db).await, 16);
    assert_eq!(count::<BoxOffice>(&db).await, 16);
    // Older movies were not linked a second time.
    assert_fan_out(&db).await;
}

#[tokio::test]
async fn same_seed_same_rows() {
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut runs = Vec::new();
    for _ in 0..2 {
        let db = setup().await;
        Generator::new(config(15, 42))
            .reference_date(today)
            .run(&db)
            .await
            .unwrap();
        let movies = Movie::find()
            .order_by_asc(movie::Column::MovieId)
            .all(&db)
            .await
            .unwrap();
        let actors = Actor::find()
            .order_by_asc(actor::Column::ActorId)
            .all(&db)
            .await
            .unwrap();
        let links = MovieActor::find()
            .order_by_asc(movie_actor::Column::MovieId)
            .order_by_asc(movie_actor::Column::ActorId)
            .all(&db)
            .await
            .unwrap();
        runs.push((movies, actors, links));
    }
    assert_eq!(runs[0], runs[1]);
}
