//! SeaORM entities for the BlockbusterBase schema.
//!
//! Independent entities (`studio`, `director`, `actor`, `movie`,
//! `streaming_platform`) own an auto-increment key. Everything else hangs off
//! a movie: junction tables keyed by `(movie_id, <entity>_id)`, plus the
//! `review`, `box_office` and `award` fact tables.

pub mod prelude;

pub mod actor;
pub mod award;
pub mod box_office;
pub mod director;
pub mod movie;
pub mod movie_actor;
pub mod movie_director;
pub mod movie_streaming;
pub mod movie_studio;
pub mod review;
pub mod sea_orm_active_enums;
pub mod streaming_platform;
pub mod studio;
