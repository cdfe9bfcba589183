use crate::client::{AlertClient, Connectivity};
use crate::config::Session;
use crate::error::Result;
use crate::output;

/// `GET <host>` against the session's host field. Only HTTP answers are
/// `Ok`; the caller decides how loudly to report a transport error.
pub async fn check(client: &AlertClient, session: &mut Session) -> Result<Connectivity> {
    let host = session.endpoint().host.clone();
    client.test_connection(&host).await
}

pub async fn run(client: &AlertClient, session: &mut Session) -> bool {
    match check(client, session).await {
        Ok(Connectivity::Connected) => {
            output::print_success("Successfully connected to API server!");
            true
        }
        Ok(Connectivity::Failed(status)) => {
            output::print_error(&format!("Failed to connect: {status}"));
            false
        }
        Err(e) => {
            tracing::debug!(error = %e, "connection test failed");
            output::print_error("Could not connect to API server");
            false
        }
    }
}
