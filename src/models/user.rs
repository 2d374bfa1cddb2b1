use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Resident,
    Manager,
}

/// The slice of a user account the residents endpoints expose.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Resident {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub apartment: String,
    pub role: UserRole,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateResidentRequest {
    pub name: String,
    pub email: String,
    pub apartment: String,
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResidentRequest {
    pub name: Option<String>,
    pub apartment: Option<String>,
    pub role: Option<UserRole>,
}
