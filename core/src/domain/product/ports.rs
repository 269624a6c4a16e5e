use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    product::{
        entities::Product,
        value_objects::{
            AnalysisOutcome, AnalyzeProductsInput, CompareProductsInput, InsertProduct,
            ProductAnalysis, ProductImage,
        },
    },
};

/// Repository trait for product records
#[cfg_attr(test, mockall::automock)]
pub trait ProductRepository: Send + Sync {
    fn get_by_id(
        &self,
        product_id: i32,
    ) -> impl Future<Output = Result<Option<Product>, CoreError>> + Send;

    /// Newest first; products created at the same instant keep insertion order.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Product>, CoreError>> + Send;

    fn create(
        &self,
        product: InsertProduct,
    ) -> impl Future<Output = Result<Product, CoreError>> + Send;

    /// Returns whether a record was removed.
    fn delete(&self, product_id: i32) -> impl Future<Output = Result<bool, CoreError>> + Send;
}

/// LLM Client trait for calling multimodal AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Fails with [`CoreError::Configuration`] when the client cannot issue requests at all.
    fn ensure_configured(&self) -> Result<(), CoreError>;

    fn generate_with_image(
        &self,
        system_instruction: String,
        prompt: String,
        image_data: Vec<u8>,
        mime_type: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for product analysis and catalogue operations
#[cfg_attr(test, mockall::automock)]
pub trait ProductService: Send + Sync {
    fn get_product(
        &self,
        product_id: i32,
    ) -> impl Future<Output = Result<Product, CoreError>> + Send;

    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, CoreError>> + Send;

    fn create_product(
        &self,
        product: InsertProduct,
    ) -> impl Future<Output = Result<Product, CoreError>> + Send;

    fn delete_product(&self, product_id: i32)
    -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Runs one image through the model and returns the validated analysis without storing it.
    fn analyze_image(
        &self,
        image: ProductImage,
    ) -> impl Future<Output = Result<ProductAnalysis, CoreError>> + Send;

    /// Analyzes and stores every image; one outcome per image, in input order.
    fn analyze_products(
        &self,
        input: AnalyzeProductsInput,
    ) -> impl Future<Output = Result<Vec<AnalysisOutcome>, CoreError>> + Send;

    fn compare_products(
        &self,
        input: CompareProductsInput,
    ) -> impl Future<Output = Result<Vec<Product>, CoreError>> + Send;
}
