use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub last_synced: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::design_products::Entity")]
    DesignProducts,
}

impl Related<super::design_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DesignProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
