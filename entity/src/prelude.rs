pub use super::actor::Entity as Actor;
pub use super::award::Entity as Award;
pub use super::box_office::Entity as BoxOffice;
pub use super::director::Entity as Director;
pub use super::movie::Entity as Movie;
pub use super::movie_actor::Entity as MovieActor;
pub use super::movie_director::Entity as MovieDirector;
pub use super::movie_streaming::Entity as MovieStreaming;
pub use super::movie_studio::Entity as MovieStudio;
pub use super::review::Entity as Review;
pub use super::sea_orm_active_enums::{AwardName, Genre};
pub use super::streaming_platform::Entity as StreamingPlatform;
pub use super::studio::Entity as Studio;
