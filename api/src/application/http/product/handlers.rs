pub mod analyze_products;
pub mod compare_products;
pub mod delete_product;
pub mod get_product;
pub mod get_products;
