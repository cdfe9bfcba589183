use crate::alert::AlertRequest;
use crate::config::Session;
use crate::error::{AlertgenError, Result};
use reqwest::{Client, Response};
use serde_json::Value;

/// Outcome of `GET <host>` when the server answered at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Connected,
    Failed(u16),
}

pub struct AlertClient {
    client: Client,
}

impl AlertClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn handle_response(resp: Response) -> Result<Value> {
        let status = resp.status();
        tracing::info!(status = status.as_u16(), "alert service responded");
        let text = resp.error_for_status()?.text().await?;
        serde_json::from_str(&text).map_err(AlertgenError::Json)
    }

    /// Sends one message and returns the parsed body whatever its `status`
    /// field says. `url_override` wins over the session's URL.
    pub async fn send_alert_request(
        &self,
        message: &str,
        url_override: Option<&str>,
        session: &mut Session,
    ) -> Result<Value> {
        let url = match url_override {
            Some(url) => url.to_string(),
            None => session.resolve_url(),
        };
        session.record_url(url.clone());
        tracing::debug!(%url, message_len = message.len(), "sending alert request");

        let resp = self
            .client
            .post(&url)
            .json(&AlertRequest::new(message))
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    /// Transport errors come back as `Err`; any HTTP answer is `Ok`.
    /// Anything below 400 counts as connected.
    pub async fn test_connection(&self, host: &str) -> Result<Connectivity> {
        tracing::debug!(%host, "testing connection");
        let resp = self.client.get(host).send().await?;
        let status = resp.status();
        if !(status.is_client_error() || status.is_server_error()) {
            Ok(Connectivity::Connected)
        } else {
            Ok(Connectivity::Failed(status.as_u16()))
        }
    }
}

impl Default for AlertClient {
    fn default() -> Self {
        Self::new()
    }
}

/// A local URI nothing listens on.
#[cfg(test)]
pub(crate) fn refused_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session_for(server: &MockServer) -> Session {
        Session::new(None).with_endpoint(EndpointConfig::new(server.uri(), "/api/v1/chat"))
    }

    #[tokio::test]
    async fn posts_fixed_payload_and_returns_body() {
        let server = MockServer::start().await;
        let reply = json!({
            "status": "success",
            "alert_config": {"type": "TimerAlert", "params": {"duration": 300}}
        });
        Mock::given(method("POST"))
            .and(path("/api/v1/chat"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "user_id": "streamlit_user",
                "message": "If a car stays in the driveway for more than 5 minutes, send an alert",
                "camera_id": null
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&reply))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session_for(&server);
        let body = AlertClient::new()
            .send_alert_request(
                "If a car stays in the driveway for more than 5 minutes, send an alert",
                None,
                &mut session,
            )
            .await
            .expect("request should succeed");

        assert_eq!(body, reply);
        assert_eq!(
            session.last_url(),
            Some(format!("{}/api/v1/chat", server.uri()).as_str())
        );
    }

    #[tokio::test]
    async fn non_success_status_field_is_still_returned() {
        let server = MockServer::start().await;
        let reply = json!({"status": "error", "message": "could not parse"});
        Mock::given(method("POST"))
            .and(path("/api/v1/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&reply))
            .mount(&server)
            .await;

        let mut session = session_for(&server);
        let body = AlertClient::new()
            .send_alert_request("hello", None, &mut session)
            .await
            .unwrap();
        assert_eq!(body, reply);
    }

    #[tokio::test]
    async fn url_override_takes_precedence() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/custom"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = Session::new(None);
        let url = format!("{}/custom", server.uri());
        AlertClient::new()
            .send_alert_request("x", Some(&url), &mut session)
            .await
            .unwrap();
        assert_eq!(session.last_url(), Some(url.as_str()));
    }

    #[tokio::test]
    async fn http_error_status_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let mut session = session_for(&server);
        let err = AlertClient::new()
            .send_alert_request("x", None, &mut session)
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().starts_with("Error communicating with API: "));
    }

    #[tokio::test]
    async fn malformed_body_is_unexpected_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let mut session = session_for(&server);
        let err = AlertClient::new()
            .send_alert_request("x", None, &mut session)
            .await
            .unwrap_err();
        assert!(!err.is_transport());
        assert!(err.to_string().starts_with("Unexpected error: "));
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let mut session =
            Session::new(None).with_endpoint(EndpointConfig::new(refused_uri(), "/api/v1/chat"));
        let err = AlertClient::new()
            .send_alert_request("x", None, &mut session)
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert!(matches!(err, AlertgenError::Http(ref e) if e.is_connect()));
    }

    #[tokio::test]
    async fn malformed_url_fails_at_send_time() {
        let mut session = Session::new(Some("not a url".into()));
        let err = AlertClient::new()
            .send_alert_request("x", None, &mut session)
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(session.last_url(), Some("not a url"));
    }

    #[tokio::test]
    async fn connection_test_outcomes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        let client = AlertClient::new();
        assert_eq!(
            client.test_connection(&server.uri()).await.unwrap(),
            Connectivity::Connected
        );

        let failing = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&failing)
            .await;
        assert_eq!(
            client.test_connection(&failing.uri()).await.unwrap(),
            Connectivity::Failed(404)
        );

        let not_modified = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(304))
            .mount(&not_modified)
            .await;
        assert_eq!(
            client.test_connection(&not_modified.uri()).await.unwrap(),
            Connectivity::Connected
        );

        let err = client.test_connection(&refused_uri()).await.unwrap_err();
        assert!(matches!(err, AlertgenError::Http(ref e) if e.is_connect()));
    }
}
