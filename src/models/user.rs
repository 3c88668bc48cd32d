//! User resource models and field validation.

use crate::error::ApiError;
use paperclip::actix::Apiv2Schema;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-ZÁÉÍÓÚáéíóúñÑ\s]+$").expect("name pattern is a valid regex")
});

/// Categorical sex field, serialized in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Masculino,
    Femenino,
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Apiv2Schema)]
pub struct User {
    pub id: u32,
    /// Display name, letters and spaces only (e.g., "Celeste")
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "sexo")]
    pub sex: Sex,
}

/// Request body for creating or replacing a user.
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct UserRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "sexo")]
    pub sex: Sex,
}

impl UserRequest {
    /// Check field constraints; `sex` is already constrained by its type.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.is_empty() {
            return Err(ApiError::Validation("nombre must not be empty".to_string()));
        }
        if !NAME_PATTERN.is_match(&self.name) {
            return Err(ApiError::Validation(
                "nombre may only contain letters".to_string(),
            ));
        }
        Ok(())
    }
}

/// Path parameters for single-user routes.
#[derive(Debug, Clone, Copy, Deserialize, Apiv2Schema)]
pub struct UserPath {
    pub id: u32,
}
