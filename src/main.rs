// Entrypoint for the lot updater.
// - Reads configuration, opens the update log once, then hands over to
//   the UI loop, which blocks until the user exits.

use anyhow::Context;
use lot_updater::{api::UploadClient, config::Config, logging, ui};

fn main() -> anyhow::Result<()> {
    logging::init();

    // See `Config::from_env` for the LOT_UPDATER_* variables.
    let config = Config::from_env()?;
    log::info!(
        "lot file {}, endpoint {}, update log {}",
        config.input_path.display(),
        config.target_url,
        config.log_path.display()
    );

    let update_log = logging::UpdateLog::open(&config.log_path)
        .context("Cannot start without the update log")?;
    let api = UploadClient::new(&config).context("Failed to build HTTP client")?;

    ui::run(api, update_log)?;
    Ok(())
}
