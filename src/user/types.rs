//! # Tipos del dominio de usuarios
//! src/user/types.rs

use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Usuario registrado
///
/// El password nunca se guarda en claro: solo su hash SHA-256 en hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,

    #[serde(skip_serializing)]
    password_hash: String,

    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(user_id: &str, password: &str, name: &str, email: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            password_hash: hash_password(password),
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    pub fn matches_password(&self, password: &str) -> bool {
        self.password_hash == hash_password(password)
    }
}

fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Errores del dominio de usuarios
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    /// Ya existe un usuario con ese id
    #[error("User id already taken: {0}")]
    DuplicateUserId(String),

    /// Falta un campo obligatorio del formulario
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
