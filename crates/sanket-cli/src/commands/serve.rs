//! Serve command

use std::path::Path;

use anyhow::Result;
use tracing::warn;

use sanket_core::Session;
use sanket_server::ServerConfig;

pub async fn cmd_serve(
    reference_dir: &Path,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    let session = Session::load_dir(reference_dir);
    if !session.references().is_loaded() {
        warn!(
            "No reference data found in {}; uploads will merge only after the \
             datasets are in place and the server is restarted",
            reference_dir.display()
        );
    }

    let static_dir = static_dir.and_then(|p| p.to_str());
    sanket_server::serve(session, host, port, static_dir, ServerConfig::default()).await
}
