//! # Recursos Estáticos
//! src/server/resources.rs
//!
//! Cuando ningún controller atiende un `GET`, el servidor busca un archivo
//! bajo el web root con el mismo path. `/` se sirve como `/index.html`.

use crate::http::headers::CONTENT_TYPE;
use crate::http::{ContentType, Method, Request, Response, StatusCode};
use percent_encoding::percent_decode_str;
use std::fs;
use std::path::{Component, Path, PathBuf};

const INDEX_FILE: &str = "index.html";

/// Archivos servidos desde un directorio raíz
#[derive(Debug, Clone)]
pub struct StaticResources {
    root: PathBuf,
}

impl StaticResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Busca el archivo que corresponde al request
    ///
    /// - `None` si el método no es GET o el archivo no existe
    /// - 403 si el path intenta salir del web root
    pub fn resolve(&self, request: &Request) -> Option<Response> {
        if !request.has_method(Method::GET) {
            return None;
        }

        let Some(relative) = relative_path(request.path()) else {
            tracing::warn!(path = request.path(), "rejected static path");
            return Some(Response::error(StatusCode::Forbidden, "Forbidden path"));
        };

        let file = self.root.join(relative);
        if !file.is_file() {
            return None;
        }

        match fs::read(&file) {
            Ok(contents) => {
                let content_type = file
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(ContentType::from_extension)
                    .unwrap_or(ContentType::OctetStream);

                let mut response = Response::ok();
                response.add_header(CONTENT_TYPE, content_type.header());
                response.add_body(contents);
                Some(response)
            }
            Err(e) => {
                tracing::error!(file = %file.display(), error = %e, "failed to read static file");
                Some(Response::error(StatusCode::InternalServerError, "Could not read file"))
            }
        }
    }
}

/// Convierte el path del request en un path relativo seguro
///
/// Retorna `None` si contiene `..` u otros componentes que no sean nombres.
fn relative_path(request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8_lossy();
    let trimmed = decoded.trim_start_matches('/');

    if trimmed.is_empty() {
        return Some(PathBuf::from(INDEX_FILE));
    }

    let path = Path::new(trimmed);
    if path.components().all(|c| matches!(c, Component::Normal(_))) {
        Some(path.to_path_buf())
    } else {
        None
    }
}
