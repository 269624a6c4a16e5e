use std::sync::Arc;

use productlens_core::application::ProductLensService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: ProductLensService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: ProductLensService) -> Self {
        Self { args, service }
    }
}
