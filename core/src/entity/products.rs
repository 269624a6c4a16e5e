use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub brand: String,
    #[sea_orm(column_type = "Text")]
    pub category: String,
    #[sea_orm(column_type = "Json")]
    pub ingredients: Json,
    #[sea_orm(column_type = "Text")]
    pub usage_instructions: String,
    #[sea_orm(column_type = "Text")]
    pub warnings: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub expiry_date: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub time_left: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub recommended_for: String,
    #[sea_orm(column_type = "Text")]
    pub not_recommended_for: String,
    #[sea_orm(column_type = "Json")]
    pub user_sentiment: Json,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
