//! # Módulo HTTP
//!
//! Este módulo implementa el modelo de mensajes HTTP/1.x desde cero, sin
//! usar librerías de alto nivel. Incluye:
//!
//! - Parsing de la request line, URI y parámetros multi-valor
//! - Headers con nombres sin distinción de mayúsculas
//! - Cookies entrantes (`Cookie`) y salientes (`Set-Cookie`)
//! - Construcción de responses con Content-Length siempre consistente
//! - Códigos de estado y status line
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: application/json;charset=utf-8\r\n
//! Content-Length: 12\r\n
//! \r\n
//! {"ok": true}
//! ```
//!
//! No hay soporte para chunked transfer-encoding, keep-alive ni HTTP/2.

pub mod charset;
pub mod cookie;
pub mod error;
pub mod headers;
pub mod protocol;
pub mod request;
pub mod response;
pub mod status;
pub mod uri;

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use charset::Charset;
pub use cookie::{Cookie, CookieBuilder, Cookies, RequestCookies, SameSite};
pub use error::HttpError;
pub use headers::{ContentType, Headers};
pub use protocol::Protocol;
pub use request::{Method, Request, RequestLine};
pub use response::Response;
pub use status::{Status, StatusCode};
pub use uri::{Parameters, Uri};
