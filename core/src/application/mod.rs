use crate::{
    domain::common::{ProductLensConfig, services::Service},
    infrastructure::{
        llm::GeminiLLMClient,
        product::{InMemoryProductRepository, PostgresProductRepository, ProductStore},
    },
};

pub type ProductLensService = Service<ProductStore, GeminiLLMClient>;

pub async fn create_service(config: ProductLensConfig) -> Result<ProductLensService, anyhow::Error> {
    let product_store = match &config.database {
        Some(database) => {
            tracing::info!("Using Postgres product storage");
            ProductStore::Postgres(PostgresProductRepository::connect(&database.url).await?)
        }
        None => {
            tracing::info!("Using in-memory product storage; products are lost on restart");
            ProductStore::Memory(InMemoryProductRepository::new())
        }
    };

    let llm_client = GeminiLLMClient::new(&config.llm)?;
    if !llm_client.is_configured() {
        tracing::error!(
            "GEMINI_API_KEY not found in environment variables! Set GEMINI_API_KEY (or GOOGLE_AI_API_KEY), e.g. in a .env file; get a key from https://ai.google.dev/. Image analysis will fail until then."
        );
    }

    Ok(Service::new(
        product_store,
        llm_client,
        config.analysis.concurrency,
    ))
}
