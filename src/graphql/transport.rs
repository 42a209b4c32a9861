//! GraphQL transport.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use url::Url;

use crate::{
    config::SubgraphSettings,
    error::{Error, Result},
    graphql::{query::GraphRequest, response::ResponseTree},
};

/// Executes one GraphQL request and returns the response `data` tree.
#[async_trait]
pub trait GraphQLTransport: Send + Sync {
    async fn execute(&self, request: &GraphRequest) -> Result<ResponseTree>;
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    #[serde(default)]
    data: Option<ResponseTree>,
    #[serde(default)]
    errors: Vec<GraphQLError>,
}

/// HTTP transport posting `{"query", "variables"}` bodies to a subgraph endpoint.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: Url,
}

impl HttpTransport {
    pub fn new(url: &str) -> Result<Self> {
        Self::with_client(url, reqwest::Client::new())
    }

    pub fn from_settings(settings: &SubgraphSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Self::with_client(&settings.url, client)
    }

    pub fn with_client(url: &str, client: reqwest::Client) -> Result<Self> {
        let url = Url::parse(url)?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl GraphQLTransport for HttpTransport {
    async fn execute(&self, request: &GraphRequest) -> Result<ResponseTree> {
        debug!("POST {} query={}", self.url, request.query);

        let response = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GraphQLResponse = response.json().await?;
        if !body.errors.is_empty() {
            return Err(Error::GraphQL(
                body.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        body.data.ok_or_else(|| Error::Shape {
            key: "data".to_string(),
            expected: crate::error::Expect::Object,
        })
    }
}

/// Transport answering every request with a fixed tree, recording the requests it saw.
#[cfg(test)]
pub(crate) struct StaticTransport {
    pub response: serde_json::Value,
    pub seen: std::sync::Mutex<Vec<GraphRequest>>,
}

#[cfg(test)]
impl StaticTransport {
    pub fn new(response: serde_json::Value) -> Self {
        Self {
            response,
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn last_query(&self) -> String {
        self.seen
            .lock()
            .unwrap()
            .last()
            .map(|r| r.query.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[async_trait]
impl GraphQLTransport for StaticTransport {
    async fn execute(&self, request: &GraphRequest) -> Result<ResponseTree> {
        self.seen.lock().unwrap().push(request.clone());
        match &self.response {
            serde_json::Value::Object(map) => Ok(map.clone()),
            _ => Err(Error::GraphQL(vec!["static transport failure".to_string()])),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, method},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    #[tokio::test]
    async fn test_posts_query_and_returns_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({"query": "{ token(id: \"0x1\"){ id } }"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"token": {"id": "0x1"}}})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri()).unwrap();
        let tree = transport
            .execute(&GraphRequest::new("{ token(id: \"0x1\"){ id } }"))
            .await
            .unwrap();
        assert_eq!(tree["token"]["id"], "0x1");
    }

    #[tokio::test]
    async fn test_graphql_errors_are_returned() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{"message": "Type `Query` has no field `tokn`"}]
            })))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri()).unwrap();
        let err = transport
            .execute(&GraphRequest::new("{ tokn { id } }"))
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("no field `tokn`"));
    }

    #[tokio::test]
    async fn test_http_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri()).unwrap();
        let err = transport.execute(&GraphRequest::new("{ x }")).await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_missing_data_is_shape_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri()).unwrap();
        let err = transport.execute(&GraphRequest::new("{ x }")).await.unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(matches!(
            HttpTransport::new("not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
