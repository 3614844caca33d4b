//! Client-side form checks.
//!
//! These mirror what an HTML form gets for free (`required`, `type=email`,
//! `type=number`). Anything deeper is the service's job. A failed check means
//! the request is never sent.

use std::fmt;

use crate::api::{MovieId, NewMovie, NewReview, Score};

/// Form field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
    Email,
    Title,
    Year,
    Metascore,
    Comment,
    Movie,
}

impl Field {
    /// Label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Field::Username => "usuario",
            Field::Password => "contraseña",
            Field::Email => "email",
            Field::Title => "título",
            Field::Year => "año",
            Field::Metascore => "metascore",
            Field::Comment => "comentario",
            Field::Movie => "película",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    Required,
    NotNumeric,
    InvalidEmail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub problem: Problem,
}

impl ValidationError {
    pub fn new(field: Field, problem: Problem) -> Self {
        Self { field, problem }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.field, self.problem) {
            (Field::Movie, _) => write!(f, "Selecciona una película"),
            (field, Problem::Required) => write!(f, "El campo {} es obligatorio", field.label()),
            (field, Problem::NotNumeric) => {
                write!(f, "El campo {} debe ser numérico", field.label())
            }
            (field, Problem::InvalidEmail) => write!(f, "El campo {} no es válido", field.label()),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Username and password for `POST /login`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Username is trimmed; the password is sent exactly as typed.
    pub fn parse(username: &str, password: &str) -> Result<Self, ValidationError> {
        let username = required(Field::Username, username)?;
        if password.is_empty() {
            return Err(ValidationError::new(Field::Password, Problem::Required));
        }
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Account details for `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub credentials: Credentials,
    pub email: String,
}

impl Registration {
    pub fn parse(username: &str, password: &str, email: &str) -> Result<Self, ValidationError> {
        let credentials = Credentials::parse(username, password)?;
        let email = required(Field::Email, email)?;
        if !looks_like_email(email) {
            return Err(ValidationError::new(Field::Email, Problem::InvalidEmail));
        }
        Ok(Self {
            credentials,
            email: email.to_string(),
        })
    }
}

/// Checks the new-movie form: all three fields present, year and metascore integers.
pub fn parse_new_movie(
    title: &str,
    year: &str,
    metascore: &str,
) -> Result<NewMovie, ValidationError> {
    let title = required(Field::Title, title)?;
    let year = integer(Field::Year, year)?;
    let metascore = integer(Field::Metascore, metascore)?;
    Ok(NewMovie {
        title: title.to_string(),
        year,
        metascore,
    })
}

/// Checks the new-review form: a movie must be selected and the comment non-empty.
pub fn parse_new_review(
    movie_id: Option<MovieId>,
    comment: &str,
    puntuacion: Score,
) -> Result<NewReview, ValidationError> {
    let movie_id = movie_id.ok_or(ValidationError::new(Field::Movie, Problem::Required))?;
    let comment = required(Field::Comment, comment)?;
    Ok(NewReview {
        movie_id,
        comment: comment.to_string(),
        puntuacion,
    })
}

fn required(field: Field, value: &str) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::new(field, Problem::Required))
    } else {
        Ok(trimmed)
    }
}

fn integer(field: Field, value: &str) -> Result<i32, ValidationError> {
    required(field, value)?
        .parse()
        .ok()
        .ok_or(ValidationError::new(field, Problem::NotNumeric))
}

/// Same shape an `<input type=email>` accepts: `local@domain`, no whitespace.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
