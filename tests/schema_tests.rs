pub mod common;

use blockbuster::{
    commands::{run_dashboard_command, run_seed_command},
    entity::{prelude::*, streaming_platform},
    report::{JsonSink, View},
    schema,
};
use pretty_assertions::assert_eq;
use sea_orm::{Database, EntityTrait, Set};

use common::{config, count, setup};

#[tokio::test]
async fn create_tables_is_idempotent() {
    let db = setup().await;
    schema::create_tables(&db).await.unwrap();
    schema::create_tables(&db).await.unwrap();
    assert_eq!(count::<Movie>(&db).await, 0);
}

#[tokio::test]
async fn platform_names_are_unique() {
    let db = setup().await;
    let netflix = || streaming_platform::ActiveModel {
        name: Set("Netflix".to_owned()),
        ..Default::default()
    };

    StreamingPlatform::insert(netflix())
        .exec(&db)
        .await
        .unwrap();
    assert!(StreamingPlatform::insert(netflix()).exec(&db).await.is_err());
}

#[tokio::test]
async fn seed_command_creates_schema_on_request() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let summary = run_seed_command(&db, config(5, 21), true).await.unwrap();

    assert_eq!(summary.movies, 5);
    assert_eq!(count::<Movie>(&db).await, 5);
}

#[tokio::test]
async fn seed_command_without_schema_fails_cleanly() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    assert!(run_seed_command(&db, config(5, 22), false).await.is_err());
}

#[tokio::test]
async fn dashboard_command_renders_selected_views_once() {
    let db = setup().await;
    run_seed_command(&db, config(12, 23), false).await.unwrap();

    let mut sink = JsonSink::new(Vec::new());
    run_dashboard_command(
        &db,
        &[View::TopStudios, View::PlatformCoverage],
        3,
        None,
        &mut sink,
    )
    .await
    .unwrap();

    let out = String::from_utf8(sink.into_inner()).unwrap();
    let views: Vec<String> = out
        .lines()
        .map(|line| {
            let chart: serde_json::Value = serde_json::from_str(line).unwrap();
            chart["view"].as_str().unwrap().to_owned()
        })
        .collect();
    assert_eq!(views, ["top_studios", "platform_coverage"]);
}

#[tokio::test]
async fn dashboard_command_defaults_to_every_view() {
    let db = setup().await;
    let mut sink = JsonSink::new(Vec::new());
    run_dashboard_command(&db, &[], 10, None, &mut sink)
        .await
        .unwrap();

    let out = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(out.lines().count(), View::ALL.len());
}
