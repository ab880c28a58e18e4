//! HTTP handlers for `/properties` and the application router.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_scalar::{Scalar, Servable};

use crate::errors::{ApiError, ErrorResponse};
use crate::filtering::{ListQuery, parse_query};
use crate::models::{Property, PropertyCreate, PropertyList, PropertyListParams, PropertyUpdate};
use crate::openapi::ApiDoc;
use crate::service::{PropertyService, RESOURCE_NAME};

/// List properties, filtered and paginated by the query string.
#[utoipa::path(
    get,
    path = "/properties",
    tag = "properties",
    params(PropertyListParams),
    responses(
        (status = StatusCode::OK, description = "Matching properties in ascending id order", body = PropertyList),
        (status = StatusCode::BAD_REQUEST, description = "Unknown or invalid query parameter", body = ErrorResponse),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error", body = ErrorResponse)
    )
)]
pub async fn list_properties(
    State(service): State<PropertyService>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<PropertyList>, ApiError> {
    let Query(params) = query?;
    let ListQuery {
        pagination,
        filters,
    } = parse_query(&params)?;
    let data = service.get_all(pagination.window(), &filters).await?;
    Ok(Json(PropertyList { data }))
}

/// Fetch one property by id.
#[utoipa::path(
    get,
    path = "/properties/{id}",
    tag = "properties",
    params(("id" = i32, Path, description = "Property id")),
    responses(
        (status = StatusCode::OK, description = "The requested property", body = Property),
        (status = StatusCode::BAD_REQUEST, description = "Id is not an integer", body = ErrorResponse),
        (status = StatusCode::NOT_FOUND, description = "Property not found", body = ErrorResponse)
    )
)]
pub async fn get_property(
    State(service): State<PropertyService>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Property>, ApiError> {
    let Path(id) = path?;
    service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(RESOURCE_NAME))
}

/// Create a property; the id is assigned by the store.
#[utoipa::path(
    post,
    path = "/properties",
    tag = "properties",
    request_body = PropertyCreate,
    responses(
        (status = StatusCode::CREATED, description = "Property created", body = Property),
        (status = StatusCode::BAD_REQUEST, description = "Malformed or invalid body", body = ErrorResponse)
    )
)]
pub async fn create_property(
    State(service): State<PropertyService>,
    payload: Result<Json<PropertyCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    let Json(create) = payload?;
    let created = service.create(create).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Overwrite the supplied fields of a property and return the stored record.
#[utoipa::path(
    put,
    path = "/properties/{id}",
    tag = "properties",
    params(("id" = i32, Path, description = "Property id")),
    request_body = PropertyUpdate,
    responses(
        (status = StatusCode::OK, description = "Property updated", body = Property),
        (status = StatusCode::BAD_REQUEST, description = "Malformed or invalid body", body = ErrorResponse),
        (status = StatusCode::NOT_FOUND, description = "Property not found", body = ErrorResponse)
    )
)]
pub async fn update_property(
    State(service): State<PropertyService>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<PropertyUpdate>, JsonRejection>,
) -> Result<Json<Property>, ApiError> {
    let Path(id) = path?;
    let Json(changes) = payload?;
    let id = service.update(id, changes).await?;
    service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(RESOURCE_NAME))
}

/// Delete a property.
#[utoipa::path(
    delete,
    path = "/properties/{id}",
    tag = "properties",
    params(("id" = i32, Path, description = "Property id")),
    responses(
        (status = StatusCode::NO_CONTENT, description = "Property deleted"),
        (status = StatusCode::BAD_REQUEST, description = "Id is not an integer", body = ErrorResponse),
        (status = StatusCode::NOT_FOUND, description = "Property not found", body = ErrorResponse)
    )
)]
pub async fn delete_property(
    State(service): State<PropertyService>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route")
}

/// `/properties` routes with their OpenAPI description.
pub fn property_routes() -> OpenApiRouter<PropertyService> {
    OpenApiRouter::new()
        .routes(routes!(list_properties, create_property))
        .routes(routes!(get_property, update_property, delete_property))
}

/// Complete application: property routes, API docs at `/docs`, request
/// tracing and a JSON 404 for unknown paths.
pub fn router(service: PropertyService) -> Router {
    let (app_routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(property_routes())
        .split_for_parts();

    app_routes
        .with_state(service)
        .merge(Scalar::with_url("/docs", api))
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
}
