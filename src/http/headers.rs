//! # Headers HTTP
//! src/http/headers.rs
//!
//! Mapa nombre → valor que conserva el orden de inserción (los headers se
//! serializan en ese orden). Los nombres se comparan sin distinguir
//! mayúsculas: `content-length` y `Content-Length` son el mismo header.
//! Al serializar se usa el nombre tal como se escribió la última vez.

use super::{Charset, HttpError, RequestCookies};
use indexmap::IndexMap;

pub const CONTENT_LENGTH: &str = "Content-Length";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const LOCATION: &str = "Location";
pub const SET_COOKIE: &str = "Set-Cookie";
pub const COOKIE: &str = "Cookie";
pub const HOST: &str = "Host";
pub const CONNECTION: &str = "Connection";
pub const SERVER: &str = "Server";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    value: String,
}

/// Headers de un request o de una respuesta
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: IndexMap<String, Entry>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsea una línea `Name: Value`
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::http::Headers;
    ///
    /// let (name, value) = Headers::parse_line("Host: localhost:8080").unwrap();
    /// assert_eq!(name, "Host");
    /// assert_eq!(value, "localhost:8080");
    /// ```
    pub fn parse_line(line: &str) -> Result<(String, String), HttpError> {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| HttpError::InvalidHeader(line.to_string()))?;

        let name = name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(HttpError::InvalidHeader(line.to_string()));
        }

        Ok((name.to_string(), value.trim().to_string()))
    }

    /// Construye los headers a partir de líneas crudas
    pub fn from_lines<'a, I>(lines: I) -> Result<Self, HttpError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut headers = Self::new();
        for line in lines {
            let (name, value) = Self::parse_line(line)?;
            headers.add(name, value);
        }
        Ok(headers)
    }

    /// Agrega un header; si ya existe se sobrescribe
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let key = name.to_ascii_lowercase();
        let entry = Entry {
            name,
            value: value.into(),
        };

        match self.entries.get_mut(&key) {
            Some(existing) => *existing = entry,
            None => {
                self.entries.insert(key, entry);
            }
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|entry| entry.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries
            .shift_remove(&name.to_ascii_lowercase())
            .map(|entry| entry.value)
    }

    pub fn contains_content_length(&self) -> bool {
        self.contains(CONTENT_LENGTH)
    }

    /// Content-Length como número
    ///
    /// Solo se aceptan dígitos ASCII (sin signo ni espacios internos).
    /// Cualquier otro valor es un error de protocolo: sin un tamaño exacto
    /// no se puede leer el body.
    pub fn content_length(&self) -> Result<usize, HttpError> {
        let raw = self
            .value(CONTENT_LENGTH)
            .ok_or_else(|| HttpError::InvalidContentLength(String::new()))?;

        let digits = raw.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(HttpError::InvalidContentLength(raw.to_string()));
        }

        digits
            .parse()
            .map_err(|_| HttpError::InvalidContentLength(raw.to_string()))
    }

    /// Verifica si el Content-Type contiene `expected`
    pub fn has_content_type(&self, expected: &str) -> bool {
        self.value(CONTENT_TYPE)
            .map(|value| value.contains(expected))
            .unwrap_or(false)
    }

    /// Charset declarado en el parámetro `charset=` del Content-Type
    pub fn charset(&self) -> Option<Charset> {
        self.value(CONTENT_TYPE)?
            .split(';')
            .skip(1)
            .filter_map(|param| param.split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
            .and_then(|(_, label)| Charset::from_label(label))
    }

    /// Cookies del header `Cookie`
    pub fn cookies(&self) -> RequestCookies {
        self.value(COOKIE)
            .map(RequestCookies::parse)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Itera en orden de inserción
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|entry| (entry.name.as_str(), entry.value.as_str()))
    }
}

/// Tipos de contenido conocidos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Html,
    Css,
    Js,
    Json,
    PlainText,
    Png,
    Ico,
    Svg,
    FormUrlEncoded,
    OctetStream,
}

impl ContentType {
    /// Valor para el header Content-Type
    pub fn header(&self) -> &'static str {
        match self {
            ContentType::Html => "text/html;charset=utf-8",
            ContentType::Css => "text/css;charset=utf-8",
            ContentType::Js => "application/javascript;charset=utf-8",
            ContentType::Json => "application/json;charset=utf-8",
            ContentType::PlainText => "text/plain;charset=utf-8",
            ContentType::Png => "image/png",
            ContentType::Ico => "image/x-icon",
            ContentType::Svg => "image/svg+xml",
            ContentType::FormUrlEncoded => "application/x-www-form-urlencoded",
            ContentType::OctetStream => "application/octet-stream",
        }
    }

    /// Tipo MIME sin parámetros
    pub fn mime(&self) -> &'static str {
        let header = self.header();
        header.split(';').next().unwrap_or(header)
    }

    /// Deduce el tipo a partir de la extensión de un archivo
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::http::ContentType;
    ///
    /// assert_eq!(ContentType::from_extension("HTML"), ContentType::Html);
    /// assert_eq!(ContentType::from_extension("bin"), ContentType::OctetStream);
    /// ```
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "html" | "htm" => ContentType::Html,
            "css" => ContentType::Css,
            "js" => ContentType::Js,
            "json" => ContentType::Json,
            "txt" => ContentType::PlainText,
            "png" => ContentType::Png,
            "ico" => ContentType::Ico,
            "svg" => ContentType::Svg,
            _ => ContentType::OctetStream,
        }
    }
}
