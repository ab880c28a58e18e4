//! # property-api
//!
//! CRUD HTTP API over property listings, backed by Sea-ORM.
//!
//! | Method   | Path               | Success                     |
//! |----------|--------------------|-----------------------------|
//! | `GET`    | `/properties`      | 200 `{"data": [Property]}`  |
//! | `GET`    | `/properties/{id}` | 200 `Property`              |
//! | `POST`   | `/properties`      | 201 `Property`              |
//! | `PUT`    | `/properties/{id}` | 200 `Property`              |
//! | `DELETE` | `/properties/{id}` | 204                         |
//!
//! The list endpoint is filtered and paginated from its query string, see
//! [`filtering`].
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use property_api::{PropertyService, SeaOrmPropertyRepository, database, routes};
//!
//! let db = database::connect("sqlite::memory:").await?;
//! let service = PropertyService::new(Arc::new(SeaOrmPropertyRepository::new(db)));
//! let app = routes::router(service);
//! ```

pub mod config;
pub mod database;
pub mod entity;
pub mod errors;
pub mod filtering;
pub mod models;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod validation;

pub use errors::ApiError;
pub use models::{Property, PropertyCreate, PropertyUpdate};
pub use repository::{PropertyRepository, SeaOrmPropertyRepository};
pub use service::PropertyService;
