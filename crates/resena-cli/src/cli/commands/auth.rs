//! Login and registration.

use anyhow::Result;
use resena_core::api::ApiClient;
use resena_core::forms::{Credentials, Registration};
use resena_core::messages;

use super::api_failure;

/// Prints the token alone on stdout so it can be captured into `RESENA_TOKEN`.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<()> {
    let credentials = Credentials::parse(username, password)?;
    let outcome = client
        .login(&credentials)
        .await
        .map_err(|err| api_failure(&err, messages::LOGIN_FAILED))?;
    eprintln!("{}", messages::LOGIN_OK);
    println!("{}", outcome.token.as_str());
    Ok(())
}

pub async fn register(
    client: &ApiClient,
    username: &str,
    password: &str,
    email: &str,
) -> Result<()> {
    let registration = Registration::parse(username, password, email)?;
    let message = client
        .register(&registration)
        .await
        .map_err(|err| api_failure(&err, messages::REGISTER_FAILED))?;
    println!("{}", message.or(messages::REGISTER_OK));
    Ok(())
}
