use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, EntityTrait, QueryOrder,
};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    product::{entities::Product, ports::ProductRepository, value_objects::InsertProduct},
};
use crate::entity::products::{
    ActiveModel as ProductActiveModel, Column as ProductColumn, Entity as ProductEntity,
};

const CREATE_PRODUCTS_TABLE: &str = include_str!("../../../migrations/0001_create_products.sql");

#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pub db: DatabaseConnection,
}

impl PostgresProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Connects and creates the `products` table when it does not exist yet.
    pub async fn connect(database_url: &str) -> Result<Self, CoreError> {
        let db = Database::connect(database_url).await.map_err(|e| {
            error!("Failed to connect to database: {}", e);
            CoreError::Configuration(format!("Failed to connect to database: {}", e))
        })?;

        for statement in CREATE_PRODUCTS_TABLE
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            db.execute_unprepared(statement).await.map_err(|e| {
                error!("Failed to prepare products table: {}", e);
                CoreError::InternalServerError
            })?;
        }

        Ok(Self::new(db))
    }
}

impl ProductRepository for PostgresProductRepository {
    async fn get_by_id(&self, product_id: i32) -> Result<Option<Product>, CoreError> {
        ProductEntity::find_by_id(product_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get product by id: {}", e);
                CoreError::InternalServerError
            })?
            .map(Product::try_from)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Product>, CoreError> {
        ProductEntity::find()
            .order_by_desc(ProductColumn::CreatedAt)
            .order_by_asc(ProductColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list products: {}", e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(Product::try_from)
            .collect()
    }

    async fn create(&self, product: InsertProduct) -> Result<Product, CoreError> {
        let active_model = ProductActiveModel::try_from(product)?;

        let model = active_model.insert(&self.db).await.map_err(|e| {
            error!("Failed to create product: {}", e);
            CoreError::InternalServerError
        })?;

        Product::try_from(model)
    }

    async fn delete(&self, product_id: i32) -> Result<bool, CoreError> {
        let result = ProductEntity::delete_by_id(product_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete product: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(result.rows_affected > 0)
    }
}
