use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::catalog::{validate_item_code, validate_product_code};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ItemIdResponse<T> {
    pub item_id: T,
}

// Path parameters

#[derive(Debug, Deserialize, Validate)]
pub struct IdPath {
    pub id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NumericIdPath {
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct IdNamePath {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RangedItemPath {
    #[validate(range(exclusive_min = 18, exclusive_max = 100))]
    pub item_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CodedItemPath {
    #[validate(custom(function = "validate_item_code"))]
    pub item_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProductCodePath {
    #[validate(custom(function = "validate_product_code"))]
    pub item_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelName {
    Alexnet,
    Resnet,
    Lenet,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ModelPath {
    pub model: ModelName,
}

// Query parameters

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct PageQuery {
    pub page: String,
    pub limit: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct OptionalLimitQuery {
    pub page: String,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct InfoQuery {
    pub page: String,
    pub limit: String,
    pub info: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LimitInfoQuery {
    pub limit: String,
    pub info: i64,
}

fn default_item_id() -> String {
    "123".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct DefaultItemQuery {
    #[serde(default = "default_item_id")]
    pub item_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ItemQuery {
    pub item_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BoundedLengthItemQuery {
    #[validate(length(min = 3, max = 10))]
    pub item_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RangedItemQuery {
    #[validate(range(exclusive_min = 0, exclusive_max = 100))]
    pub item_id: i64,
}

/// Clients send `id`; handlers read `item_id`.
#[derive(Debug, Deserialize, Validate)]
pub struct AliasedItemQuery {
    #[serde(rename = "id")]
    pub item_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CodedItemQuery {
    #[validate(custom(function = "validate_item_code"))]
    pub item_id: String,
}

// Login

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
