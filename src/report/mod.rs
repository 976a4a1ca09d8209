//! The read-only dashboard: a fixed catalogue of aggregate views, each
//! rendered as one chart through a [`ChartSink`].

mod query;
mod sink;

pub use query::*;
pub use sink::{ChartSink, JsonSink, TextSink};

use sea_orm::{ActiveEnum, ConnectionTrait, DbErr};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::Result;

pub const DEFAULT_LIMIT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum View {
    TopGrossingMovies,
    GenreDistribution,
    ReleasesPerYear,
    AvgRevenuePerGenre,
    ProlificDirectors,
    TopStudios,
    PlatformCoverage,
    HighestRatedMovies,
    MostAwardedMovies,
    FeaturedActors,
}

/// How a consumer is expected to draw a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    HorizontalBar,
    Bar,
    Pie,
    Area,
}

impl View {
    pub const ALL: [View; 10] = [
        View::TopGrossingMovies,
        View::GenreDistribution,
        View::ReleasesPerYear,
        View::AvgRevenuePerGenre,
        View::ProlificDirectors,
        View::TopStudios,
        View::PlatformCoverage,
        View::HighestRatedMovies,
        View::MostAwardedMovies,
        View::FeaturedActors,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::TopGrossingMovies => "Top Grossing Movies",
            View::GenreDistribution => "Genre Popularity",
            View::ReleasesPerYear => "Movies Released Over Time",
            View::AvgRevenuePerGenre => "Avg Revenue per Genre",
            View::ProlificDirectors => "Most Prolific Directors",
            View::TopStudios => "Top Movie Studios",
            View::PlatformCoverage => "Streaming Platform Coverage",
            View::HighestRatedMovies => "Highest Rated Movies",
            View::MostAwardedMovies => "Most Award-Winning Movies",
            View::FeaturedActors => "Most Featured Actors",
        }
    }

    pub fn kind(self) -> ChartKind {
        match self {
            View::GenreDistribution | View::PlatformCoverage => ChartKind::Pie,
            View::ReleasesPerYear => ChartKind::Area,
            View::AvgRevenuePerGenre => ChartKind::Bar,
            _ => ChartKind::HorizontalBar,
        }
    }

    /// Whether the result is cut to the top `limit` rows.
    pub fn is_capped(self) -> bool {
        !matches!(
            self,
            View::GenreDistribution
                | View::ReleasesPerYear
                | View::AvgRevenuePerGenre
                | View::PlatformCoverage
        )
    }
}

/// Rows of one view, exactly as the query returned them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewData {
    MovieRevenue(Vec<MovieRevenue>),
    GenreCount(Vec<GenreCount>),
    YearCount(Vec<YearCount>),
    GenreRevenue(Vec<GenreRevenue>),
    NamedCount(Vec<NamedCount>),
    MovieRating(Vec<MovieRating>),
    MovieAwards(Vec<MovieAwards>),
}

/// A single labelled value, the common denominator every chart can draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

impl DataPoint {
    fn new(label: impl Into<String>, value: impl Into<f64>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl ViewData {
    pub fn len(&self) -> usize {
        match self {
            ViewData::MovieRevenue(rows) => rows.len(),
            ViewData::GenreCount(rows) => rows.len(),
            ViewData::YearCount(rows) => rows.len(),
            ViewData::GenreRevenue(rows) => rows.len(),
            ViewData::NamedCount(rows) => rows.len(),
            ViewData::MovieRating(rows) => rows.len(),
            ViewData::MovieAwards(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> Vec<DataPoint> {
        // i64 -> f64 is lossy past 2^53, far beyond any count or revenue here.
        match self {
            ViewData::MovieRevenue(rows) => rows
                .iter()
                .map(|r| DataPoint::new(r.title.as_str(), r.total_revenue as f64))
                .collect(),
            ViewData::GenreCount(rows) => rows
                .iter()
                .map(|r| DataPoint::new(r.genre.to_value(), r.movie_count as f64))
                .collect(),
            ViewData::YearCount(rows) => rows
                .iter()
                .map(|r| DataPoint::new(r.release_year.to_string(), r.movie_count as f64))
                .collect(),
            ViewData::GenreRevenue(rows) => rows
                .iter()
                .map(|r| DataPoint::new(r.genre.to_value(), r.avg_revenue))
                .collect(),
            ViewData::NamedCount(rows) => rows
                .iter()
                .map(|r| DataPoint::new(r.name.as_str(), r.movie_count as f64))
                .collect(),
            ViewData::MovieRating(rows) => rows
                .iter()
                .map(|r| DataPoint::new(r.title.as_str(), r.avg_rating))
                .collect(),
            ViewData::MovieAwards(rows) => rows
                .iter()
                .map(|r| DataPoint::new(r.title.as_str(), r.award_count as f64))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub view: View,
    pub title: &'static str,
    pub kind: ChartKind,
    pub data: ViewData,
}

/// Run the query behind `view`. `limit` only applies where
/// [`View::is_capped`] holds; the other views return every row.
pub async fn load<C>(db: &C, view: View, limit: u64) -> Result<Chart, DbErr>
where
    C: ConnectionTrait,
{
    let limit = view.is_capped().then_some(limit);
    let data = match view {
        View::TopGrossingMovies => ViewData::MovieRevenue(top_grossing_movies(db, limit).await?),
        View::GenreDistribution => ViewData::GenreCount(genre_distribution(db, limit).await?),
        View::ReleasesPerYear => ViewData::YearCount(releases_per_year(db, limit).await?),
        View::AvgRevenuePerGenre => {
            ViewData::GenreRevenue(avg_revenue_per_genre(db, limit).await?)
        }
        View::ProlificDirectors => ViewData::NamedCount(prolific_directors(db, limit).await?),
        View::TopStudios => ViewData::NamedCount(top_studios(db, limit).await?),
        View::PlatformCoverage => ViewData::NamedCount(platform_coverage(db, limit).await?),
        View::HighestRatedMovies => {
            ViewData::MovieRating(highest_rated_movies(db, limit).await?)
        }
        View::MostAwardedMovies => {
            ViewData::MovieAwards(most_awarded_movies(db, limit).await?)
        }
        View::FeaturedActors => ViewData::NamedCount(featured_actors(db, limit).await?),
    };
    debug!(?view, rows = data.len(), "view loaded");

    Ok(Chart {
        view,
        title: view.title(),
        kind: view.kind(),
        data,
    })
}

/// Outcome of one pass over the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    pub rendered: Vec<View>,
    /// Views whose query failed, with the database error message.
    pub failed: Vec<(View, String)>,
}

impl RenderReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub async fn render_all<C, S>(db: &C, limit: u64, sink: &mut S) -> Result<RenderReport>
where
    C: ConnectionTrait,
    S: ChartSink + ?Sized,
{
    render_views(db, &View::ALL, limit, sink).await
}

/// Render `views` in order. A failing query only costs its own chart; a
/// failing sink aborts the pass.
pub async fn render_views<C, S>(
    db: &C,
    views: &[View],
    limit: u64,
    sink: &mut S,
) -> Result<RenderReport>
where
    C: ConnectionTrait,
    S: ChartSink + ?Sized,
{
    let mut report = RenderReport::default();
    for &view in views {
        match load(db, view, limit).await {
            Ok(chart) => {
                sink.render(&chart)?;
                report.rendered.push(view);
            }
            Err(err) => {
                error!(?view, %err, "view failed");
                report.failed.push((view, err.to_string()));
            }
        }
    }
    info!(
        rendered = report.rendered.len(),
        failed = report.failed.len(),
        "dashboard rendered"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::prelude::Genre;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalogue_is_complete() {
        let views: std::collections::HashSet<_> = View::ALL.iter().collect();
        assert_eq!(views.len(), 10);
        assert!(View::TopGrossingMovies.is_capped());
        assert!(!View::GenreDistribution.is_capped());
        assert_eq!(View::PlatformCoverage.kind(), ChartKind::Pie);
    }

    #[test]
    fn points_use_display_labels() {
        let data = ViewData::GenreCount(vec![GenreCount {
            genre: Genre::SciFi,
            movie_count: 4,
        }]);
        assert_eq!(data.points(), vec![DataPoint::new("Sci-Fi", 4.0)]);

        let data = ViewData::YearCount(vec![YearCount {
            release_year: 1999,
            movie_count: 2,
        }]);
        assert_eq!(data.points(), vec![DataPoint::new("1999", 2.0)]);
    }

    #[test]
    fn chart_serializes_rows_untagged() {
        let chart = Chart {
            view: View::TopStudios,
            title: View::TopStudios.title(),
            kind: View::TopStudios.kind(),
            data: ViewData::NamedCount(vec![NamedCount {
                id: 3,
                name: "Apex Films".to_owned(),
                movie_count: 7,
            }]),
        };
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "view": "top_studios",
                "title": "Top Movie Studios",
                "kind": "horizontal_bar",
                "data": [{ "id": 3, "name": "Apex Films", "movie_count": 7 }],
            })
        );
    }
}
