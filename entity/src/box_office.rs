use sea_orm::entity::prelude::*;

/// Keyed by `movie_id`, so a movie can never have two box-office rows.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "box_office")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub movie_id: i32,
    pub domestic_revenue: i64,
    pub international_revenue: i64,
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
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl Model {
    pub fn total_revenue(&self) -> i64 {
        self.domestic_revenue + self.international_revenue
    }
}

impl ActiveModelBehavior for ActiveModel {}
