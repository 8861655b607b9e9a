//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! Este módulo proporciona una API para construir respuestas HTTP
//! de forma programática y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 302 Found\r\n
//! Location: /index.html\r\n
//! Set-Cookie: logined=true; Path=/\r\n
//! \r\n
//! ```
//!
//! ## Invariante del body
//!
//! `Content-Length` lo calcula siempre [`Response::add_body`]. No existe
//! forma de dejar un body con un Content-Length distinto a su tamaño:
//! [`Response::add_header`] ignora los intentos de escribir ese header.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use webserver::http::{Cookie, Response};
//!
//! let mut response = Response::redirect("/index.html");
//! response.add_cookie(Cookie::builder("logined", "true").path("/").build());
//!
//! let bytes = response.to_bytes();
//! // Ahora puedes enviar `bytes` por el socket
//! ```

use super::headers::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION, SET_COOKIE};
use super::{ContentType, Cookie, Cookies, Headers, Status, StatusCode};
use serde::Serialize;
use std::io::{self, Write};

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Versión + código de estado
    status: Status,

    /// Headers HTTP en orden de inserción
    headers: Headers,

    /// Cookies que se envían como `Set-Cookie`
    cookies: Cookies,

    /// Cuerpo de la respuesta (None = sin body)
    body: Option<Vec<u8>>,
}

impl Response {
    /// Crea una respuesta sin headers, cookies ni body
    pub fn new(status: Status) -> Self {
        Self {
            status,
            headers: Headers::new(),
            cookies: Cookies::new(),
            body: None,
        }
    }

    /// 200 OK vacío
    pub fn ok() -> Self {
        Self::new(Status::ok())
    }

    /// 200 OK con un body de texto
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::http::Response;
    ///
    /// let response = Response::ok_with_body("body");
    /// assert_eq!(response.body(), Some(&b"body"[..]));
    /// assert_eq!(response.headers().value("Content-Length"), Some("4"));
    /// ```
    pub fn ok_with_body(body: &str) -> Self {
        let mut response = Self::ok();
        response.add_body(body);
        response
    }

    /// 302 Found con el header `Location`
    pub fn redirect(location: &str) -> Self {
        let mut response = Self::new(Status::found());
        response.headers.add(LOCATION, location);
        response
    }

    /// Respuesta JSON exitosa (200 OK) con `value` serializado
    ///
    /// Automáticamente establece `Content-Type: application/json;charset=utf-8`.
    /// Si `value` no se puede serializar responde 500.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => {
                let mut response = Self::ok();
                response.add_header(CONTENT_TYPE, ContentType::Json.header());
                response.add_body(body);
                response
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize JSON body");
                Self::error(StatusCode::InternalServerError, "Could not serialize response")
            }
        }
    }

    /// Respuesta de error con mensaje JSON
    ///
    /// Formato del JSON: `{"error": "mensaje"}`
    pub fn error(code: StatusCode, message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        let mut response = Self::from(code);
        response.add_header(CONTENT_TYPE, ContentType::Json.header());
        response.add_body(body);
        response
    }

    /// Agrega un header (si ya existe se sobrescribe)
    ///
    /// `Content-Length` no se puede escribir a mano: se deriva del body.
    pub fn add_header(&mut self, name: &str, value: &str) {
        if name.eq_ignore_ascii_case(CONTENT_LENGTH) {
            tracing::warn!(value, "ignoring manual Content-Length, it is derived from the body");
            return;
        }
        self.headers.add(name, value);
    }

    /// Versión encadenable de [`Response::add_header`]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Reemplaza el body y actualiza `Content-Length` en el mismo paso
    pub fn add_body(&mut self, body: impl Into<Vec<u8>>) {
        let body = body.into();
        self.headers.add(CONTENT_LENGTH, body.len().to_string());
        self.body = Some(body);
    }

    /// Versión encadenable de [`Response::add_body`]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.add_body(body);
        self
    }

    pub fn add_cookie(&mut self, cookie: Cookie) {
        self.cookies.add(cookie);
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn status_code(&self) -> StatusCode {
        self.status.code()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn cookies(&self) -> &Cookies {
        &self.cookies
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Escribe la respuesta completa en `writer`
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers en orden de inserción: `Name: Value\r\n`
    /// - Una línea `Set-Cookie` por cookie
    /// - Línea vacía: `\r\n`
    /// - Body sin transformar
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}\r\n", self.status)?;

        for (name, value) in self.headers.iter() {
            write!(writer, "{}: {}\r\n", name, value)?;
        }

        for cookie in self.cookies.iter() {
            write!(writer, "{}: {}\r\n", SET_COOKIE, cookie)?;
        }

        writer.write_all(b"\r\n")?;

        if let Some(body) = &self.body {
            writer.write_all(body)?;
        }

        Ok(())
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        // Escribir en un Vec no falla
        let _ = self.write_to(&mut bytes);
        bytes
    }
}

impl From<StatusCode> for Response {
    /// Respuesta vacía con el código dado (HTTP/1.1)
    fn from(code: StatusCode) -> Self {
        Self::new(Status::from(code))
    }
}
