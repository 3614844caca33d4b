//! Interactive client.

use anyhow::{Context, Result};
use resena_core::api::ApiClient;

pub async fn run(client: ApiClient) -> Result<()> {
    resena_tui::run_interactive(client)
        .await
        .context("interactive client failed")
}
