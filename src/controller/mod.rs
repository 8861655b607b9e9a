//! # Front Controller
//! src/controller/mod.rs
//!
//! Este módulo implementa el despacho de requests a controllers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Dispatcher → primer Controller cuyo `requires` es true → Response
//! ```
//!
//! El orden de registro importa: si dos controllers aceptan el mismo
//! request, gana el que se registró primero. Si ninguno lo acepta,
//! [`Dispatcher::dispatch`] retorna `None` y el servidor decide (recurso
//! estático o 404).

pub mod user;

pub use user::{UserCreateController, UserListController, UserLoginController};

use crate::http::{Request, Response};

/// Unidad que decide si atiende un request y cómo responderlo
pub trait Controller: Send + Sync {
    /// Indica si este controller atiende el request
    fn requires(&self, request: &Request) -> bool;

    /// Procesa el request (solo se llama si `requires` retornó true)
    fn handle(&self, request: &Request) -> Response;

    /// Nombre para logs
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Lista ordenada de controllers
///
/// Se arma una vez al arrancar y después solo se lee, así que puede
/// compartirse entre threads con un `Arc` sin locks.
#[derive(Default)]
pub struct Dispatcher {
    controllers: Vec<Box<dyn Controller>>,
}

impl Dispatcher {
    /// Crea un dispatcher vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un controller al final de la lista
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::controller::{Controller, Dispatcher};
    /// use webserver::http::{Method, Request, Response};
    ///
    /// struct Hello;
    ///
    /// impl Controller for Hello {
    ///     fn requires(&self, request: &Request) -> bool {
    ///         request.has_method(Method::GET) && request.has_path("/hello")
    ///     }
    ///
    ///     fn handle(&self, _request: &Request) -> Response {
    ///         Response::ok_with_body("hello")
    ///     }
    /// }
    ///
    /// let mut dispatcher = Dispatcher::new();
    /// dispatcher.register(Hello);
    ///
    /// let request = Request::parse("GET /hello HTTP/1.1\r\n\r\n").unwrap();
    /// assert!(dispatcher.dispatch(&request).is_some());
    /// ```
    pub fn register<C: Controller + 'static>(&mut self, controller: C) {
        self.controllers.push(Box::new(controller));
    }

    /// Versión encadenable de [`Dispatcher::register`]
    pub fn with<C: Controller + 'static>(mut self, controller: C) -> Self {
        self.register(controller);
        self
    }

    /// Busca el primer controller que acepta el request y lo ejecuta
    pub fn dispatch(&self, request: &Request) -> Option<Response> {
        let controller = self
            .controllers
            .iter()
            .find(|controller| controller.requires(request))?;

        tracing::debug!(
            controller = controller.name(),
            method = %request.method(),
            path = request.path(),
            "dispatching request"
        );

        Some(controller.handle(request))
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Method, StatusCode};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Controller de prueba que cuenta cuántas veces lo invocan
    struct Fixed {
        method: Method,
        path: &'static str,
        body: &'static str,
        calls: Arc<AtomicUsize>,
    }

    impl Fixed {
        fn new(method: Method, path: &'static str, body: &'static str) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let controller = Self {
                method,
                path,
                body,
                calls: Arc::clone(&calls),
            };
            (controller, calls)
        }
    }

    impl Controller for Fixed {
        fn requires(&self, request: &Request) -> bool {
            request.has_method(self.method) && request.has_path(self.path)
        }

        fn handle(&self, _request: &Request) -> Response {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Response::ok_with_body(self.body)
        }
    }

    fn request(raw: &str) -> Request {
        Request::parse(raw).unwrap()
    }

    #[test]
    fn test_dispatcher_creation() {
        let dispatcher = Dispatcher::new();
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_register() {
        let (a, _) = Fixed::new(Method::GET, "/a", "a");
        let (b, _) = Fixed::new(Method::GET, "/b", "b");
        let dispatcher = Dispatcher::new().with(a).with(b);

        assert_eq!(dispatcher.len(), 2);
    }

    #[test]
    fn test_dispatch_picks_matching_controller() {
        let (create, create_calls) = Fixed::new(Method::POST, "/user/create", "created");
        let (other, other_calls) = Fixed::new(Method::GET, "/x", "x");
        let dispatcher = Dispatcher::new().with(create).with(other);

        let response = dispatcher
            .dispatch(&request("POST /user/create HTTP/1.1\r\n\r\n"))
            .unwrap();

        assert_eq!(response.body(), Some(&b"created"[..]));
        assert_eq!(create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(other_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_first_registered_wins() {
        let (first, first_calls) = Fixed::new(Method::GET, "/same", "first");
        let (second, second_calls) = Fixed::new(Method::GET, "/same", "second");
        let dispatcher = Dispatcher::new().with(first).with(second);

        let response = dispatcher.dispatch(&request("GET /same HTTP/1.1\r\n\r\n")).unwrap();

        assert_eq!(response.body(), Some(&b"first"[..]));
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_method_is_part_of_the_match() {
        let (create, calls) = Fixed::new(Method::POST, "/user/create", "created");
        let dispatcher = Dispatcher::new().with(create);

        assert!(dispatcher.dispatch(&request("GET /user/create HTTP/1.1\r\n\r\n")).is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_no_match_is_none() {
        let (a, _) = Fixed::new(Method::GET, "/a", "a");
        let dispatcher = Dispatcher::new().with(a);

        assert!(dispatcher.dispatch(&request("GET /nonexistent HTTP/1.1\r\n\r\n")).is_none());
    }

    #[test]
    fn test_dispatch_returns_handler_response_untouched() {
        struct Redirecting;

        impl Controller for Redirecting {
            fn requires(&self, _request: &Request) -> bool {
                true
            }

            fn handle(&self, _request: &Request) -> Response {
                Response::redirect("/index.html")
            }
        }

        let dispatcher = Dispatcher::new().with(Redirecting);
        let response = dispatcher.dispatch(&request("GET / HTTP/1.1\r\n\r\n")).unwrap();

        assert_eq!(response.status_code(), StatusCode::Found);
        assert_eq!(response.headers().len(), 1);
    }
}
