//! Request models for the body-validation endpoints.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn default_person_name() -> String {
    "Lubu".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Person {
    #[serde(default = "default_person_name")]
    pub name: String,
    pub age: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Product {
    #[validate(range(exclusive_min = 0.0, max = 100.0))]
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Account {
    #[validate(length(min = 3, max = 20))]
    pub username: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Item {
    pub name: String,
    #[validate(length(max = 100))]
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Contact {
    #[validate(contains(pattern = "@", message = "email must contain '@'"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Order {
    #[validate(length(min = 10))]
    pub items: Vec<serde_json::Value>,
    pub address: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
}

impl Default for Document {
    /// Every document gets its own id.
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
        }
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Passwords start with at least six word characters.
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.chars().take_while(|c| is_word_char(*c)).count() >= 6 {
        Ok(())
    } else {
        Err(invalid(
            "password",
            "password must start with at least 6 letters, digits or underscores",
        ))
    }
}

/// `a` followed by exactly two ASCII digits, e.g. `a42`.
pub fn validate_item_code(value: &str) -> Result<(), ValidationError> {
    let mut chars = value.chars();
    let valid = chars.next() == Some('a')
        && chars.clone().count() == 2
        && chars.all(|c| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(invalid("item_code", "must match 'a' followed by two digits"))
    }
}

pub fn validate_product_code(value: &str) -> Result<(), ValidationError> {
    if value.starts_with("P-") {
        Ok(())
    } else {
        Err(invalid("product_code", "must start with 'P-'"))
    }
}
