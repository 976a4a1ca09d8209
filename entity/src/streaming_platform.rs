use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "streaming_platforms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub platform_id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_streaming::Entity")]
    MovieStreaming,
}

impl Related<super::movie_streaming::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieStreaming.def()
    }
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_streaming::Relation::Movie.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_streaming::Relation::StreamingPlatform.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
