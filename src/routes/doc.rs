use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        designs::{CreateDesignRequest, DesignList, DesignSyncResult},
        products::{CreateProductRequest, ProductList},
    },
    entity::design_products::DesignStatus,
    models::{DesignProduct, Product, SyncState, User},
    response::{ApiResponse, Meta},
    routes::{auth, designs, health, params, products},
    sync::{Mismatch, SyncReport},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        products::list_products,
        products::create_product,
        products::get_product,
        designs::list_designs,
        designs::create_design,
        designs::get_design,
        designs::sync_design
    ),
    components(
        schemas(
            User,
            Product,
            DesignProduct,
            DesignStatus,
            SyncState,
            SyncReport,
            Mismatch,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateProductRequest,
            CreateDesignRequest,
            ProductList,
            DesignList,
            DesignSyncResult,
            params::Pagination,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<DesignProduct>,
            ApiResponse<DesignList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Designs", description = "Design and platform sync endpoints"),
        (name = "Auth", description = "Authentication endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
