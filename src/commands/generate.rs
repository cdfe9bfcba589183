use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::alert::{self, Presentation};
use crate::client::AlertClient;
use crate::config::Session;
use crate::error::{AlertgenError, Result};
use crate::commands::validate_message;
use crate::output;

/// Validates, sends and renders one message. A body whose `status` is not
/// `"success"` comes back as `NotSuccess`.
pub async fn run(
    message: &str,
    url_override: Option<&str>,
    client: &AlertClient,
    session: &mut Session,
    output_format: &str,
) -> Result<()> {
    let message = validate_message(message)?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Processing...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = client.send_alert_request(message, url_override, session).await;
    spinner.finish_and_clear();

    match alert::present(&result?) {
        Presentation::Generated { config, alert } => {
            output::render_alert(&mut std::io::stdout().lock(), &config, &alert, output_format)?;
            Ok(())
        }
        Presentation::NotSuccess { status } => Err(AlertgenError::NotSuccess { status }),
    }
}
