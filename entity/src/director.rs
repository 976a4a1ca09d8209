use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "directors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub director_id: i32,
    pub name: String,
    pub birthdate: Date,
    pub nationality: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_director::Entity")]
    MovieDirector,
}

impl Related<super::movie_director::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieDirector.def()
    }
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_director::Relation::Movie.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_director::Relation::Director.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
