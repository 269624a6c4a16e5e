use chrono::Local;
use futures::{StreamExt, stream};
use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    product::{
        entities::Product,
        ports::{LLMClient, ProductRepository, ProductService},
        schema::{build_analysis_prompt, get_product_analysis_schema},
        validation::{parse_analysis, validate_insert},
        value_objects::{
            AnalysisOutcome, AnalyzeProductsInput, CompareProductsInput, InsertProduct,
            ProductAnalysis, ProductImage,
        },
    },
};

/// Fewest products a comparison is meaningful for
pub const MIN_COMPARED_PRODUCTS: usize = 2;

const USER_PROMPT: &str = "Analyze this product package image.";

impl<PR, LLM> Service<PR, LLM>
where
    PR: ProductRepository,
    LLM: LLMClient,
{
    /// Analysis followed by storage; nothing is stored unless every check passed.
    async fn analyze_and_store(&self, image: ProductImage) -> Result<Product, CoreError> {
        let analysis = self.analyze_image(image).await?;
        self.create_product(InsertProduct::from(analysis)).await
    }
}

impl<PR, LLM> ProductService for Service<PR, LLM>
where
    PR: ProductRepository,
    LLM: LLMClient,
{
    async fn get_product(&self, product_id: i32) -> Result<Product, CoreError> {
        self.product_repository
            .get_by_id(product_id)
            .await?
            .ok_or(CoreError::NotFound)
    }

    async fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        self.product_repository.list_all().await
    }

    async fn create_product(&self, product: InsertProduct) -> Result<Product, CoreError> {
        validate_insert(&product)?;

        let product = self.product_repository.create(product).await?;
        tracing::info!(product_id = product.id, name = %product.name, "Product stored");

        Ok(product)
    }

    async fn delete_product(&self, product_id: i32) -> Result<(), CoreError> {
        if !self.product_repository.delete(product_id).await? {
            return Err(CoreError::NotFound);
        }

        tracing::info!(product_id, "Product deleted");
        Ok(())
    }

    #[instrument(skip(self, image), fields(filename = %image.filename, mime_type = %image.mime_type))]
    async fn analyze_image(&self, image: ProductImage) -> Result<ProductAnalysis, CoreError> {
        self.llm_client.ensure_configured()?;

        if image.data.is_empty() {
            return Err(CoreError::validation("image", "image data cannot be empty"));
        }

        let system_instruction = build_analysis_prompt(Local::now().date_naive());

        let raw_response = self
            .llm_client
            .generate_with_image(
                system_instruction,
                USER_PROMPT.to_string(),
                image.data.to_vec(),
                image.mime_type,
                get_product_analysis_schema(),
            )
            .await?;

        parse_analysis(&raw_response).inspect_err(|e| {
            tracing::warn!(error = %e, "LLM reply rejected");
        })
    }

    async fn analyze_products(
        &self,
        input: AnalyzeProductsInput,
    ) -> Result<Vec<AnalysisOutcome>, CoreError> {
        if input.images.is_empty() {
            return Err(CoreError::validation("images", "no images provided"));
        }

        let outcomes = stream::iter(input.images)
            .map(|image| async move {
                let filename = image.filename.clone();
                match self.analyze_and_store(image).await {
                    Ok(product) => AnalysisOutcome::Analyzed(product),
                    Err(e) => {
                        tracing::error!(filename = %filename, error = %e, "Error analyzing image");
                        AnalysisOutcome::Failed {
                            filename,
                            reason: e.to_string(),
                        }
                    }
                }
            })
            .buffered(self.analysis_concurrency)
            .collect::<Vec<_>>()
            .await;

        tracing::info!(
            total = outcomes.len(),
            analyzed = outcomes.iter().filter(|o| o.is_analyzed()).count(),
            "Analysis batch finished"
        );

        Ok(outcomes)
    }

    async fn compare_products(
        &self,
        input: CompareProductsInput,
    ) -> Result<Vec<Product>, CoreError> {
        if input.product_ids.len() < MIN_COMPARED_PRODUCTS {
            return Err(CoreError::validation(
                "productIds",
                "At least 2 product IDs are required for comparison",
            ));
        }

        let mut products = Vec::with_capacity(input.product_ids.len());
        for product_id in input.product_ids {
            if let Some(product) = self.product_repository.get_by_id(product_id).await? {
                products.push(product);
            }
        }

        if products.len() < MIN_COMPARED_PRODUCTS {
            return Err(CoreError::validation(
                "productIds",
                "At least 2 valid products are required for comparison",
            ));
        }

        Ok(products)
    }
}
