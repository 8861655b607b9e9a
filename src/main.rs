//! # Web Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor. Lee la configuración (CLI + env),
//! inicializa los logs y arranca el servidor con los controllers de usuarios.

use webserver::config::Config;
use webserver::logging;
use webserver::server::Server;
use webserver::user::UserStore;

fn main() {
    let config = Config::new();

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("Invalid log configuration: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid configuration");
        std::process::exit(1);
    }

    config.log_summary();

    let server = Server::with_user_controllers(config, UserStore::new());

    // Bloquea el thread principal
    if let Err(e) = server.run() {
        tracing::error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}
