use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "operations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "interventionId")]
    pub intervention_id: i32,
    pub label: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::interventions::Entity",
        from = "Column::InterventionId",
        to = "super::interventions::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Intervention,
    #[sea_orm(has_many = "super::operation_lines::Entity")]
    OperationLines,
}

impl Related<super::interventions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Intervention.def()
    }
}

impl Related<super::operation_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OperationLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
