use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub registration: String,
    #[sea_orm(column_name = "serialNumber", unique)]
    pub serial_number: Option<String>,
    pub owner: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub motorization: Option<String>,
    #[sea_orm(column_name = "engineCode")]
    pub engine_code: Option<String>,
    #[sea_orm(column_name = "releaseDate")]
    pub release_date: Option<Date>,
    pub comments: Option<String>,
    #[sea_orm(column_type = "Blob", nullable)]
    pub certificate: Option<Vec<u8>>,
    #[sea_orm(column_type = "Blob", nullable)]
    pub picture: Option<Vec<u8>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::interventions::Entity")]
    Interventions,
}

impl Related<super::interventions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Interventions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
