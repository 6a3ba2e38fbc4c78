pub mod auth_service;
pub mod design_service;
pub mod product_service;
