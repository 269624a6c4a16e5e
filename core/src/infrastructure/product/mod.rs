use crate::domain::{
    common::entities::app_errors::CoreError,
    product::{entities::Product, ports::ProductRepository, value_objects::InsertProduct},
};

pub mod mappers;
pub mod memory_repository;
pub mod postgres_repository;

pub use memory_repository::InMemoryProductRepository;
pub use postgres_repository::PostgresProductRepository;

/// Storage backend chosen at startup.
#[derive(Debug, Clone)]
pub enum ProductStore {
    Memory(InMemoryProductRepository),
    Postgres(PostgresProductRepository),
}

impl ProductRepository for ProductStore {
    async fn get_by_id(&self, product_id: i32) -> Result<Option<Product>, CoreError> {
        match self {
            ProductStore::Memory(repository) => repository.get_by_id(product_id).await,
            ProductStore::Postgres(repository) => repository.get_by_id(product_id).await,
        }
    }

    async fn list_all(&self) -> Result<Vec<Product>, CoreError> {
        match self {
            ProductStore::Memory(repository) => repository.list_all().await,
            ProductStore::Postgres(repository) => repository.list_all().await,
        }
    }

    async fn create(&self, product: InsertProduct) -> Result<Product, CoreError> {
        match self {
            ProductStore::Memory(repository) => repository.create(product).await,
            ProductStore::Postgres(repository) => repository.create(product).await,
        }
    }

    async fn delete(&self, product_id: i32) -> Result<bool, CoreError> {
        match self {
            ProductStore::Memory(repository) => repository.delete(product_id).await,
            ProductStore::Postgres(repository) => repository.delete(product_id).await,
        }
    }
}
