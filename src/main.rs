// Entrypoint for the CLI application.
// - Keeps `main` small: load credentials, build the API client, and hand
//   it to the UI loop.
// - Returns `anyhow::Result` so start-up failures print a readable chain.

use anyhow::Context;
use company_query_cli::{api::ApiClient, config::Credentials, ui::main_menu};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Reads `lock.env` (cwd, then the user config dir) and the process
    // environment. Missing credentials stop here, before any request.
    let credentials = Credentials::load().context("Failed to load API credentials")?;
    let api = ApiClient::new(&credentials).context("Failed to set up API client")?;

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(&api)?;
    Ok(())
}
