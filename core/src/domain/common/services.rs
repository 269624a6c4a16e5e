use crate::domain::product::ports::{LLMClient, ProductRepository};

#[derive(Clone)]
pub struct Service<PR, LLM>
where
    PR: ProductRepository,
    LLM: LLMClient,
{
    pub(crate) product_repository: PR,
    pub(crate) llm_client: LLM,
    pub(crate) analysis_concurrency: usize,
}

impl<PR, LLM> Service<PR, LLM>
where
    PR: ProductRepository,
    LLM: LLMClient,
{
    pub fn new(product_repository: PR, llm_client: LLM, analysis_concurrency: usize) -> Self {
        Self {
            product_repository,
            llm_client,
            analysis_concurrency: analysis_concurrency.max(1),
        }
    }
}
