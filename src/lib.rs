//! # Web Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 implementado desde cero sobre `std::net`, con un
//! front controller que despacha requests a controllers registrados y
//! sirve archivos estáticos cuando ninguno los atiende.
//!
//! ## Arquitectura
//!
//! - `http`: modelo del protocolo (request, response, headers, cookies, uri)
//! - `server`: lectura de requests desde el socket, recursos estáticos y
//!   el loop TCP concurrente
//! - `controller`: trait `Controller` y el `Dispatcher`
//! - `user`: dominio de usuarios (registro, login, listado)
//! - `config`: configuración por CLI y variables de entorno
//! - `logging`: inicialización de `tracing`
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use webserver::config::Config;
//! use webserver::server::Server;
//! use webserver::user::UserStore;
//!
//! let config = Config::default();
//! let server = Server::with_user_controllers(config, UserStore::new());
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod controller;
pub mod http;
pub mod logging;
pub mod server;
pub mod user;
