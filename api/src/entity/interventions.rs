use sea_orm::entity::prelude::*;

/// `year` and `number` are assigned by the store on insert and never
/// updated afterwards.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "interventions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "carId")]
    pub car_id: i32,
    pub year: i32,
    pub number: i32,
    pub status: String,
    pub description: Option<String>,
    pub mileage: Option<i32>,
    #[sea_orm(column_name = "estimatedTime")]
    pub estimated_time: Option<f64>,
    #[sea_orm(column_name = "realTime")]
    pub real_time: Option<f64>,
    pub amount: Option<f64>,
    #[sea_orm(column_name = "paidAmount")]
    pub paid_amount: Option<f64>,
    pub comments: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cars::Entity",
        from = "Column::CarId",
        to = "super::cars::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Car,
    #[sea_orm(has_many = "super::operations::Entity")]
    Operations,
}

impl Related<super::cars::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl Related<super::operations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
