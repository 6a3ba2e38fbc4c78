pub mod design_products;
pub mod products;
pub mod users;

pub use design_products::Entity as DesignProducts;
pub use products::Entity as Products;
pub use users::Entity as Users;
