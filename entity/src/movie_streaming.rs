use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movie_streaming")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub movie_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub platform_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movie::Entity",
        from = "Column::MovieId",
        to = "super::movie::Column::MovieId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Movie,
    #[sea_orm(
        belongs_to = "super::streaming_platform::Entity",
        from = "Column::PlatformId",
        to = "super::streaming_platform::Column::PlatformId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    StreamingPlatform,
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl Related<super::streaming_platform::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StreamingPlatform.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
