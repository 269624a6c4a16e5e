pub mod product;
pub mod server;
