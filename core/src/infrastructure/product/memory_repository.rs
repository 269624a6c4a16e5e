use std::{collections::BTreeMap, sync::Arc};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{
    common::entities::app_errors::CoreError,
    product::{entities::Product, ports::ProductRepository, value_objects::InsertProduct},
};

#[derive(Debug)]
struct ProductTable {
    next_id: i32,
    // keyed by id, so iteration order is insertion order
    products: BTreeMap<i32, Product>,
}

/// Process-scoped product store. Contents are lost on restart.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    table: Arc<RwLock<ProductTable>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(ProductTable {
                next_id: 1,
                products: BTreeMap::new(),
            })),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductRepository for InMemoryProductRepository {
    async fn get_by_id(&self, product_id: i32) -> Result<Option<Product>, CoreError> {
        let table = self.table.read().await;
        Ok(table.products.get(&product_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Product>, CoreError> {
        let table = self.table.read().await;
        let mut products: Vec<Product> = table.products.values().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn create(&self, product: InsertProduct) -> Result<Product, CoreError> {
        let mut table = self.table.write().await;

        let id = table.next_id;
        table.next_id = id.checked_add(1).ok_or_else(|| {
            tracing::error!("Product id space exhausted");
            CoreError::InternalServerError
        })?;

        let product = Product::new(id, product, Utc::now());
        table.products.insert(id, product.clone());

        Ok(product)
    }

    async fn delete(&self, product_id: i32) -> Result<bool, CoreError> {
        let mut table = self.table.write().await;
        Ok(table.products.remove(&product_id).is_some())
    }
}
