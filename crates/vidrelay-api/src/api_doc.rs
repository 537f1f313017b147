//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use vidrelay_core::models;

/// Declares the caller's OAuth access token as an HTTP bearer scheme.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vidrelay API",
        version = "0.1.0",
        description = "Relays browser video uploads to YouTube using the caller's own OAuth access token. Files are uploaded sequentially; the first failure aborts the batch."
    ),
    paths(
        handlers::upload::upload_status,
        handlers::upload::upload_videos,
    ),
    components(
        schemas(
            models::UploadResponse,
            models::UploadResult,
            models::UploadRouteStatus,
            models::Visibility,
            error::ErrorResponse,
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "upload", description = "Multi-file video upload relay")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
