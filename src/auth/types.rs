//! Types for authentication and account management

use serde::{Deserialize, Serialize};

use crate::suppliers::Supplier;

/// Email/password credentials for either login mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Input for the `createUser` mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserInput {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Password
    pub password: String,

    /// CPF, digits only
    pub cpf: String,
}

/// Input for the `createSupplier` mutation; suppliers carry no CPF
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSupplierInput {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Input for the `updateUser` mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserInput {
    /// The user to update
    pub id: String,

    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// New CPF, digits only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
}

/// A user account as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    /// The user id
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// CPF, digits only
    #[serde(default)]
    pub cpf: Option<String>,
}

/// Payload of the `loginUser` / `createUser` mutations
#[derive(Debug, Clone, Deserialize)]
pub struct UserAuthPayload {
    /// The authenticated user
    pub user: UserAccount,

    /// The API bearer token
    pub token: String,
}

/// Payload of the `loginSupplier` / `createSupplier` mutations
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierAuthPayload {
    /// The authenticated supplier
    pub supplier: Supplier,

    /// The API bearer token
    pub token: String,
}
