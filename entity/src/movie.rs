use super::sea_orm_active_enums::Genre;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub movie_id: i32,
    pub title: String,
    pub genre: Genre,
    pub release_year: i32,
    pub budget: i64,
    pub revenue: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::box_office::Entity")]
    BoxOffice,
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
    #[sea_orm(has_many = "super::award::Entity")]
    Award,
    #[sea_orm(has_many = "super::movie_studio::Entity")]
    MovieStudio,
    #[sea_orm(has_many = "super::movie_director::Entity")]
    MovieDirector,
    #[sea_orm(has_many = "super::movie_actor::Entity")]
    MovieActor,
    #[sea_orm(has_many = "super::movie_streaming::Entity")]
    MovieStreaming,
}

impl Related<super::box_office::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BoxOffice.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::award::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Award.def()
    }
}

impl Related<super::studio::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_studio::Relation::Studio.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_studio::Relation::Movie.def().rev())
    }
}

impl Related<super::director::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_director::Relation::Director.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_director::Relation::Movie.def().rev())
    }
}

impl Related<super::actor::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_actor::Relation::Actor.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_actor::Relation::Movie.def().rev())
    }
}

impl Related<super::streaming_platform::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_streaming::Relation::StreamingPlatform.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_streaming::Relation::Movie.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
