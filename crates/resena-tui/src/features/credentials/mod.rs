//! Login and registration form.

mod render;
mod state;
mod update;

pub use render::render_credentials;
pub use state::{CredentialField, CredentialsState, Mode};
pub use update::{handle_key, handle_login_result, handle_paste, handle_register_result, submit};
