//! Minimal W3C WebDriver client.
//!
//! Only what the search-page collector needs: check the driver is up, open a
//! headless browser session, navigate, read the rendered page source and
//! close the session again. Everything goes over plain JSON/HTTP.

use std::time::Duration;

use serde_json::{Value, json};

use crate::error::AppError;

pub struct WebDriver {
    client: reqwest::Client,
    base_url: String,
}

impl WebDriver {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fail fast when no driver is listening or it reports not ready.
    pub async fn ensure_ready(&self) -> Result<(), AppError> {
        let resp = self
            .client
            .get(format!("{}/status", self.base_url))
            .send()
            .await
            .map_err(|e| {
                AppError::Config(format!("WebDriver not reachable at {}: {e}", self.base_url))
            })?;

        let body: Value = resp
            .json()
            .await
            .map_err(|e| AppError::Config(format!("WebDriver status unreadable: {e}")))?;

        if body.pointer("/value/ready").and_then(Value::as_bool) == Some(true) {
            Ok(())
        } else {
            let message = body
                .pointer("/value/message")
                .and_then(Value::as_str)
                .unwrap_or("driver reported not ready");
            Err(AppError::Config(format!("WebDriver not ready: {message}")))
        }
    }

    /// Start a headless Chrome session.
    pub async fn new_session(&self) -> Result<Session<'_>, AppError> {
        let body = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": {
                        "args": ["--headless", "--disable-gpu", "--no-sandbox"]
                    }
                }
            }
        });

        let value = self
            .command(self.client.post(format!("{}/session", self.base_url)).json(&body))
            .await?;

        let id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::WebDriver("new session response has no sessionId".into()))?
            .to_string();

        tracing::debug!("Opened WebDriver session {id}");
        Ok(Session { driver: self, id })
    }

    /// Send a command and unwrap the `value` envelope, turning WebDriver
    /// error payloads into [`AppError::WebDriver`].
    async fn command(&self, request: reqwest::RequestBuilder) -> Result<Value, AppError> {
        let resp = request.send().await?;
        let status = resp.status();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| AppError::WebDriver(format!("unreadable response ({status}): {e}")))?;

        let value = body.get("value").cloned().unwrap_or(Value::Null);
        if !status.is_success() {
            return Err(AppError::WebDriver(describe_error(status.as_u16(), &value)));
        }
        Ok(value)
    }
}

pub struct Session<'a> {
    driver: &'a WebDriver,
    id: String,
}

impl Session<'_> {
    fn url(&self, path: &str) -> String {
        format!("{}/session/{}{path}", self.driver.base_url, self.id)
    }

    pub async fn navigate(&self, url: &str) -> Result<(), AppError> {
        self.driver
            .command(
                self.driver
                    .client
                    .post(self.url("/url"))
                    .json(&json!({ "url": url })),
            )
            .await?;
        Ok(())
    }

    pub async fn page_source(&self) -> Result<String, AppError> {
        let value = self
            .driver
            .command(self.driver.client.get(self.url("/source")))
            .await?;
        value
            .as_str()
            .map(String::from)
            .ok_or_else(|| AppError::WebDriver("page source is not a string".into()))
    }

    /// End the session and close the browser.
    pub async fn quit(self) -> Result<(), AppError> {
        self.driver
            .command(self.driver.client.delete(self.url("")))
            .await?;
        tracing::debug!("Closed WebDriver session {}", self.id);
        Ok(())
    }
}

fn describe_error(status: u16, value: &Value) -> String {
    let kind = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    let message = value.get("message").and_then(Value::as_str).unwrap_or("");
    if message.is_empty() {
        format!("{kind} (HTTP {status})")
    } else {
        format!("{kind} (HTTP {status}): {message}")
    }
}
