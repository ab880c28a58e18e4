use utoipa::OpenApi;

use crate::errors::ErrorResponse;
use crate::models::{Property, PropertyCreate, PropertyList, PropertyUpdate};
use crate::validation::ValidationError;

/// OpenAPI document for the service; paths are added by the router.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Property API",
        description = "Create, read, update and delete property listings. \
                       `GET /properties` accepts `page`, `limit` and `<operator>:<value>` filters."
    ),
    tags((name = "properties", description = "Property listings")),
    components(schemas(Property, PropertyCreate, PropertyUpdate, PropertyList, ErrorResponse, ValidationError))
)]
pub struct ApiDoc;
