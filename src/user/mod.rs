//! # Usuarios
//! src/user/mod.rs
//!
//! Dominio mínimo que usan los controllers de registro, login y listado:
//! - `types`: el modelo [`User`] y sus errores
//! - `store`: almacenamiento en memoria compartido entre threads
//!
//! El store no es global: se crea una vez al arrancar el servidor y se
//! inyecta en cada controller que lo necesita.

pub mod store;
pub mod types;

pub use store::UserStore;
pub use types::{User, UserError};
