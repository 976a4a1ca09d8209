//! Synthetic data generator and read-only analytics dashboard for the
//! BlockbusterBase movie schema.
//!
//! The two halves only meet through the database:
//!
//! - [`generator`] fills every table of the [`entity`] schema in one
//!   transaction, keeping each foreign key pointed at a row that exists.
//! - [`report`] runs a fixed battery of aggregate views and hands each result
//!   to a [`report::ChartSink`].
//!
//! ```no_run
//! # async fn run() -> blockbuster::Result<()> {
//! use blockbuster::{generator::{Generator, GeneratorConfig}, report, schema};
//!
//! let db = sea_orm::Database::connect("sqlite::memory:").await?;
//! schema::create_tables(&db).await?;
//!
//! let summary = Generator::new(GeneratorConfig::default()).run(&db).await?;
//! println!("{summary}");
//!
//! let mut sink = report::TextSink::new(std::io::stdout());
//! report::render_all(&db, 10, &mut sink).await?;
//! # Ok(())
//! # }
//! ```
#![deny(missing_debug_implementations)]

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod generator;
pub mod report;
pub mod schema;

pub use entity;
pub use error::{Error, Result};
