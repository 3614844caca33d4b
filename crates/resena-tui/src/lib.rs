//! Full-screen terminal client for the Reseña movie-review service.
//!
//! Elm-style: `state` holds everything, `update` is the only place state
//! changes, `render` draws it and `runtime` executes the effects the
//! reducer asks for.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr, stdout};

use anyhow::Result;
pub use features::{catalog, credentials, statusline};
use resena_core::api::ApiClient;
pub use runtime::TuiRuntime;

/// Opens the terminal client against `client`'s service.
///
/// # Errors
/// Fails when stdout is not a terminal or the terminal cannot be set up.
pub async fn run_interactive(client: ApiClient) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive client requires a terminal.\n\
             Use `resena movies list` and friends for non-interactive use."
        );
    }

    tracing::info!(base_url = client.base_url(), "starting interactive client");
    {
        let mut runtime = TuiRuntime::new(client)?;
        runtime.run()?;
    }

    writeln!(stderr(), "¡Hasta luego!")?;
    Ok(())
}
