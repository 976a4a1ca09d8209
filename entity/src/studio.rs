use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "studios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub studio_id: i32,
    pub name: String,
    pub founded_year: i32,
    pub location: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_studio::Entity")]
    MovieStudio,
}

impl Related<super::movie_studio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieStudio.def()
    }
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_studio::Relation::Movie.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_studio::Relation::Studio.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
