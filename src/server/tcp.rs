//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio thread
//! y atiende un único request (`Connection: close`).
//!
//! ```text
//! accept → read_request → Dispatcher → (recurso estático) → (404) → write
//! ```

use super::reader::read_request;
use super::resources::StaticResources;
use crate::config::Config;
use crate::controller::{
    Dispatcher, UserCreateController, UserListController, UserLoginController,
};
use crate::http::headers::{CONNECTION, SERVER};
use crate::http::{Request, Response, StatusCode};
use crate::user::UserStore;
use std::io::{self, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const SERVER_NAME: &str = "webserver/0.1";

/// Estado compartido (solo lectura) entre los threads de conexión
struct Context {
    dispatcher: Dispatcher,
    resources: StaticResources,
    max_body: usize,
    read_timeout: Duration,
}

/// Servidor HTTP concurrente
pub struct Server {
    config: Config,
    context: Arc<Context>,
}

impl Server {
    /// Crea un servidor con un dispatcher ya armado
    pub fn new(config: Config, dispatcher: Dispatcher) -> Self {
        let context = Context {
            dispatcher,
            resources: StaticResources::new(&config.web_root),
            max_body: config.max_body_bytes,
            read_timeout: config.read_timeout(),
        };

        Self {
            config,
            context: Arc::new(context),
        }
    }

    /// Servidor con los controllers de usuarios registrados sobre `store`
    pub fn with_user_controllers(config: Config, store: UserStore) -> Self {
        let dispatcher = Dispatcher::new()
            .with(UserCreateController::new(store.clone()))
            .with(UserLoginController::new(store.clone()))
            .with(UserListController::new(store));

        Self::new(config, dispatcher)
    }

    /// Hace bind en la dirección configurada y atiende conexiones
    /// (bloquea el thread actual)
    pub fn run(&self) -> io::Result<()> {
        let listener = TcpListener::bind(self.config.address())?;
        self.serve(listener)
    }

    /// Atiende conexiones de un listener ya creado
    pub fn serve(&self, listener: TcpListener) -> io::Result<()> {
        tracing::info!(
            address = %listener.local_addr()?,
            controllers = self.context.dispatcher.len(),
            "listening for connections, one thread per connection"
        );

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let context = Arc::clone(&self.context);

                    thread::spawn(move || {
                        if let Err(e) = handle_connection(stream, &context) {
                            tracing::warn!(error = %e, "connection failed");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to accept connection");
                }
            }
        }

        Ok(())
    }
}

/// Resuelve un request ya parseado
///
/// Primero los controllers, después los recursos estáticos y por último 404.
fn respond(request: &Request, context: &Context) -> Response {
    context
        .dispatcher
        .dispatch(request)
        .or_else(|| context.resources.resolve(request))
        .unwrap_or_else(|| {
            Response::error(
                StatusCode::NotFound,
                &format!("Route not found: {}", request.path()),
            )
        })
}

fn handle_connection(stream: TcpStream, context: &Context) -> io::Result<()> {
    let start = Instant::now();
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    stream.set_read_timeout(Some(context.read_timeout))?;

    let mut reader = BufReader::new(&stream);
    let (mut response, target) = match read_request(&mut reader, context.max_body) {
        Ok(request) => {
            let target = format!("{} {}", request.method(), request.path());
            (respond(&request, context), target)
        }
        Err(e) => {
            tracing::debug!(%peer, error = %e, "invalid request");
            (Response::error(e.status(), &e.to_string()), "-".to_string())
        }
    };

    // Headers comunes a todas las respuestas
    response.add_header(SERVER, SERVER_NAME);
    response.add_header(CONNECTION, "close");

    let mut writer = &stream;
    response.write_to(&mut writer)?;
    writer.flush()?;

    tracing::info!(
        %peer,
        request = %target,
        status = response.status_code().as_u16(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "request served"
    );

    Ok(())
}
