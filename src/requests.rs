use anyhow::{Context, bail};
use reqwest::{Client, ClientBuilder, Response};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct RequestClient {
    client: Client,
}

impl RequestClient {
    pub fn new() -> anyhow::Result<Self> {
        let client = ClientBuilder::new().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Sends a GET without looking at the status.
    pub async fn fetch_url_response(&self, url: &str) -> anyhow::Result<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        Ok(response)
    }

    /// Fetches a page body, treating any non-success status as an error.
    pub async fn fetch_url_body(&self, url: &str) -> anyhow::Result<String> {
        let response = self.fetch_url_response(url).await?;
        let status = response.status();
        if !status.is_success() {
            bail!("failed to retrieve {url}: status code {status}");
        }
        let body = response.text().await?;
        Ok(body)
    }
}
