//! # Controllers de Usuarios
//! src/controller/user.rs
//!
//! - `POST /user/create`: registro desde el formulario
//! - `POST /user/login`: login, marca la cookie `logined`
//! - `GET /user/list`: listado JSON, solo con `logined=true`
//!
//! Los tres reciben el [`UserStore`] en su constructor.

use super::Controller;
use crate::http::{Cookie, Method, Request, Response, StatusCode};
use crate::user::{User, UserError, UserStore};

const INDEX_PAGE: &str = "/index.html";
const FORM_FAILED_PAGE: &str = "/user/form_failed.html";
const LOGIN_PAGE: &str = "/user/login.html";
const LOGIN_FAILED_PAGE: &str = "/user/login_failed.html";

const LOGINED_COOKIE: &str = "logined";

/// Obtiene un parámetro obligatorio del formulario
fn required<'a>(request: &'a Request, field: &'static str) -> Result<&'a str, UserError> {
    request
        .parameter(field)
        .filter(|value| !value.is_empty())
        .ok_or(UserError::MissingField(field))
}

fn logined_cookie(logined: bool) -> Cookie {
    Cookie::builder(LOGINED_COOKIE, logined.to_string())
        .path("/")
        .build()
}

/// Registro de usuarios: `POST /user/create`
///
/// # Parámetros del formulario
/// - `userId`, `password`, `name`, `email` (todos requeridos)
///
/// # Respuestas
/// - 302 a `/index.html` si se registró
/// - 302 a `/user/form_failed.html` si el id ya existe
/// - 400 si falta algún campo
pub struct UserCreateController {
    store: UserStore,
}

impl UserCreateController {
    pub fn new(store: UserStore) -> Self {
        Self { store }
    }

    fn create(&self, request: &Request) -> Result<(), UserError> {
        let user = User::new(
            required(request, "userId")?,
            required(request, "password")?,
            required(request, "name")?,
            required(request, "email")?,
        );
        self.store.add(user)
    }
}

impl Controller for UserCreateController {
    fn requires(&self, request: &Request) -> bool {
        request.has_method(Method::POST) && request.has_path("/user/create")
    }

    fn handle(&self, request: &Request) -> Response {
        match self.create(request) {
            Ok(()) => {
                tracing::info!(user_id = request.parameter("userId"), "user created");
                Response::redirect(INDEX_PAGE)
            }
            Err(UserError::DuplicateUserId(user_id)) => {
                tracing::info!(%user_id, "sign-up rejected, id already taken");
                Response::redirect(FORM_FAILED_PAGE)
            }
            Err(error @ UserError::MissingField(_)) => {
                Response::error(StatusCode::BadRequest, &error.to_string())
            }
        }
    }

    fn name(&self) -> &'static str {
        "UserCreateController"
    }
}

/// Login: `POST /user/login`
///
/// Si `userId` y `password` coinciden, redirige a `/index.html` con
/// `logined=true`; si no, a `/user/login_failed.html` con `logined=false`.
pub struct UserLoginController {
    store: UserStore,
}

impl UserLoginController {
    pub fn new(store: UserStore) -> Self {
        Self { store }
    }

    fn authenticate(&self, request: &Request) -> bool {
        let (Some(user_id), Some(password)) = (request.parameter("userId"), request.parameter("password")) else {
            return false;
        };

        self.store
            .find_by_id(user_id)
            .map(|user| user.matches_password(password))
            .unwrap_or(false)
    }
}

impl Controller for UserLoginController {
    fn requires(&self, request: &Request) -> bool {
        request.has_method(Method::POST) && request.has_path("/user/login")
    }

    fn handle(&self, request: &Request) -> Response {
        let logined = self.authenticate(request);
        tracing::info!(user_id = request.parameter("userId"), logined, "login attempt");

        let mut response = if logined {
            Response::redirect(INDEX_PAGE)
        } else {
            Response::redirect(LOGIN_FAILED_PAGE)
        };
        response.add_cookie(logined_cookie(logined));
        response
    }

    fn name(&self) -> &'static str {
        "UserLoginController"
    }
}

/// Listado de usuarios: `GET /user/list`
///
/// Requiere la cookie `logined=true`; sin ella redirige a `/user/login.html`.
///
/// # Ejemplo de response
/// ```json
/// [{"userId": "jordy", "name": "Jordy", "email": "jordy@kakao.com"}]
/// ```
pub struct UserListController {
    store: UserStore,
}

impl UserListController {
    pub fn new(store: UserStore) -> Self {
        Self { store }
    }
}

impl Controller for UserListController {
    fn requires(&self, request: &Request) -> bool {
        request.has_method(Method::GET) && request.has_path("/user/list")
    }

    fn handle(&self, request: &Request) -> Response {
        if request.cookie(LOGINED_COOKIE) != Some("true") {
            return Response::redirect(LOGIN_PAGE);
        }

        Response::json(&self.store.all())
    }

    fn name(&self) -> &'static str {
        "UserListController"
    }
}
