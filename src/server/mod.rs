//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes (un thread por conexión)
//! 3. Lee y parsea requests HTTP
//! 4. Despacha a un controller o a un recurso estático
//! 5. Escribe la respuesta y cierra la conexión

pub mod reader;
pub mod resources;
pub mod tcp;

pub use reader::read_request;
pub use resources::StaticResources;
pub use tcp::Server;
