//! HTTP session backed by `reqwest`.

use std::future::Future;

use kolmail_protocol::{GameRequest, Method};
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use tracing::debug;
use url::Url;

use super::{Session, SessionConfig};
use crate::error::{Error, Result};

/// A logged-in session talking to the game over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: reqwest::Client,
    base_url: Url,
    password_hash: Option<String>,
}

impl HttpSession {
    /// Creates a session from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &SessionConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| Error::Config(format!("invalid cookie header: {e}")))?;
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url()?,
            password_hash: config.password_hash.clone(),
        })
    }

    /// Returns the server root requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn execute(&self, request: &GameRequest) -> Result<String> {
        let mut url = self.base_url.join(request.path())?;
        let form = request.encode(self.password_hash.as_deref());

        debug!(path = request.path(), method = ?request.method(), "Issuing request");

        let response = match request.method() {
            Method::Get => {
                if !form.is_empty() {
                    url.set_query(Some(&form));
                }
                self.client.get(url).send().await?
            }
            Method::Post => {
                self.client
                    .post(url)
                    .header(
                        CONTENT_TYPE,
                        HeaderValue::from_static("application/x-www-form-urlencoded"),
                    )
                    .body(form)
                    .send()
                    .await?
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                code: status.as_u16(),
                path: request.path().to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

impl Session for HttpSession {
    fn request(&self, request: &GameRequest) -> impl Future<Output = Result<String>> + Send {
        self.execute(request)
    }
}
