use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entity::property;
use crate::validation::{Validatable, ValidationError, ValidationErrors, validators};

const MAX_ADDRESS_LENGTH: usize = 255;
const MAX_TYPE_LENGTH: usize = 64;

/// A property listing as stored and returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Property {
    /// Identifier assigned by the store on creation
    pub id: i32,
    pub address: String,
    /// Asking price in whole currency units
    pub price: i64,
    pub bedrooms: i32,
    pub bathrooms: Option<i32>,
    /// Free-form category label, e.g. `MultiFamily`
    #[serde(rename = "type")]
    pub property_type: Option<String>,
}

impl From<property::Model> for Property {
    fn from(model: property::Model) -> Self {
        Self {
            id: model.id,
            address: model.address,
            price: model.price,
            bedrooms: model.bedrooms,
            bathrooms: model.bathrooms,
            property_type: model.property_type,
        }
    }
}

/// Body of `POST /properties`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PropertyCreate {
    pub address: String,
    pub price: i64,
    pub bedrooms: i32,
    #[serde(default)]
    pub bathrooms: Option<i32>,
    #[serde(default, rename = "type")]
    pub property_type: Option<String>,
}

impl From<PropertyCreate> for property::ActiveModel {
    fn from(create: PropertyCreate) -> Self {
        Self {
            address: Set(create.address.trim().to_string()),
            price: Set(create.price),
            bedrooms: Set(create.bedrooms),
            bathrooms: Set(create.bathrooms),
            property_type: Set(create.property_type.as_deref().map(trim_type)),
            ..Default::default()
        }
    }
}

impl Validatable for PropertyCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validate_address(&self.address));
        errors.check(validators::validate_range("price", self.price, Some(0), None));
        errors.check(validators::validate_range("bedrooms", self.bedrooms, Some(0), None));
        if let Some(bathrooms) = self.bathrooms {
            errors.check(validators::validate_range("bathrooms", bathrooms, Some(0), None));
        }
        if let Some(property_type) = &self.property_type {
            errors.check(validate_type(property_type));
        }
        errors.result()
    }
}

/// Body of `PUT /properties/{id}`: every field is optional and only the
/// fields present are overwritten. `bathrooms` and `type` can be cleared
/// with an explicit `null`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PropertyUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<i32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<i32>)]
    pub bathrooms: Option<Option<i32>>,
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub property_type: Option<Option<String>>,
}

impl PropertyUpdate {
    /// True when the body names no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.price.is_none()
            && self.bedrooms.is_none()
            && self.bathrooms.is_none()
            && self.property_type.is_none()
    }

    /// Active model with only the supplied columns set; `id` stays untouched.
    #[must_use]
    pub fn into_active_model(self) -> property::ActiveModel {
        let mut active = property::ActiveModel::default();
        if let Some(address) = self.address {
            active.address = Set(address.trim().to_string());
        }
        if let Some(price) = self.price {
            active.price = Set(price);
        }
        if let Some(bedrooms) = self.bedrooms {
            active.bedrooms = Set(bedrooms);
        }
        if let Some(bathrooms) = self.bathrooms {
            active.bathrooms = Set(bathrooms);
        }
        if let Some(property_type) = self.property_type {
            active.property_type = Set(property_type.as_deref().map(trim_type));
        }
        active
    }

    /// Overwrite the supplied fields of `property` in place, as the store would.
    #[cfg(test)]
    pub(crate) fn apply_to(&self, property: &mut Property) {
        if let Some(address) = &self.address {
            property.address = address.trim().to_string();
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(bedrooms) = self.bedrooms {
            property.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = self.bathrooms {
            property.bathrooms = bathrooms;
        }
        if let Some(property_type) = &self.property_type {
            property.property_type = property_type.as_deref().map(trim_type);
        }
    }
}

impl Validatable for PropertyUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            return Err(ValidationError::new("body", "At least one field must be provided").into());
        }

        let mut errors = ValidationErrors::new();
        if let Some(address) = &self.address {
            errors.check(validate_address(address));
        }
        if let Some(price) = self.price {
            errors.check(validators::validate_range("price", price, Some(0), None));
        }
        if let Some(bedrooms) = self.bedrooms {
            errors.check(validators::validate_range("bedrooms", bedrooms, Some(0), None));
        }
        if let Some(Some(bathrooms)) = self.bathrooms {
            errors.check(validators::validate_range("bathrooms", bathrooms, Some(0), None));
        }
        if let Some(Some(property_type)) = &self.property_type {
            errors.check(validate_type(property_type));
        }
        errors.result()
    }
}

fn validate_address(address: &str) -> Result<(), ValidationError> {
    validators::validate_required("address", address)?;
    validators::validate_length("address", address.trim(), None, Some(MAX_ADDRESS_LENGTH))
}

fn validate_type(property_type: &str) -> Result<(), ValidationError> {
    validators::validate_required("type", property_type)?;
    validators::validate_length("type", property_type.trim(), None, Some(MAX_TYPE_LENGTH))
}

/// Stored form of a `type` label; filters compare against trimmed values.
fn trim_type(property_type: &str) -> String {
    property_type.trim().to_string()
}

/// Response body of `GET /properties`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PropertyList {
    pub data: Vec<Property>,
}

/// Query parameters accepted by `GET /properties`.
///
/// Filter values use the grammar `<operator>:<value>` or a bare `<value>`,
/// which means `eq`. Any other parameter name is rejected.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PropertyListParams {
    /// Page number, 1-based. Defaults to 1.
    #[param(example = 1, minimum = 1)]
    pub page: Option<u64>,
    /// Page size, 1 to 50. Defaults to 10.
    #[param(example = 10, minimum = 1, maximum = 50)]
    pub limit: Option<u64>,
    /// Exact address match.
    #[param(example = "6201 15th Ave")]
    pub address: Option<String>,
    /// Price filter: `eq`, `gt` or `lt`.
    #[param(example = "gt:500000")]
    pub price: Option<String>,
    /// Bedrooms filter: `eq`, `gt` or `lt`.
    #[param(example = "gt:3")]
    pub bedrooms: Option<String>,
    /// Bathrooms filter: `eq`, `gt` or `lt`.
    #[param(example = "2")]
    pub bathrooms: Option<String>,
    /// Type filter: `eq` or `not`.
    #[serde(rename = "type")]
    #[param(example = "not:MultiFamily")]
    pub property_type: Option<String>,
}
