//! User-facing strings.
//!
//! The movie-review service answers in Spanish, so the client does too. Every
//! string shown in the status line or printed by the CLI lives here.

pub const CONNECTION_FAILED: &str = "Error al conectar con el servidor";

pub const LOGIN_OK: &str = "Login exitoso!";
pub const LOGIN_FAILED: &str = "Error en login";
pub const REGISTER_OK: &str = "Usuario registrado, ya puedes iniciar sesión";
pub const REGISTER_FAILED: &str = "Error en registro";
pub const LOGGED_OUT: &str = "Sesión cerrada";
pub const NOT_LOGGED_IN: &str = "Inicia sesión para continuar";

pub const MOVIES_LOAD_FAILED: &str = "Error al cargar películas";
pub const MOVIE_CREATED: &str = "Película creada";
pub const MOVIE_CREATE_FAILED: &str = "Error al crear película";

pub const REVIEWS_LOAD_FAILED: &str = "Error al cargar reseñas";
pub const REVIEW_CREATED: &str = "Reseña creada";
pub const REVIEW_CREATE_FAILED: &str = "Error al crear reseña";

pub const NO_MOVIES: &str = "No hay películas";
pub const NO_REVIEWS: &str = "Sin reseñas";
pub const SELECT_MOVIE: &str = "Selecciona una película para ver sus reseñas";
pub const LOADING: &str = "Cargando...";
