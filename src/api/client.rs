// src/api/client.rs
//! Thin reqwest wrapper for the Notion API.
//!
//! Handles authentication headers and response decoding without business
//! logic. Tokens vary per task owner, so headers are built per request
//! rather than baked into the client.

use crate::api::{PageWriter, SchemaSource};
use crate::constants::NOTION_API_VERSION;
use crate::error::{EngineError, NotionErrorCode};
use crate::schema::raw::RawDatabase;
use crate::types::ApiToken;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

const API_BASE_URL: &str = "https://api.notion.com/v1";

/// Error body shape returned by the Notion API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

pub struct NotionHttpClient {
    client: Client,
}

impl NotionHttpClient {
    pub fn new() -> Result<Self, EngineError> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    fn headers(token: &ApiToken) -> Result<header::HeaderMap, EngineError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", token.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|err| {
                EngineError::MissingConfiguration(format!("Invalid API token format: {}", err))
            })?,
        );
        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    async fn get(&self, token: &ApiToken, endpoint: &str) -> Result<Response, EngineError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("GET {}", url);
        Ok(self
            .client
            .get(url)
            .headers(Self::headers(token)?)
            .send()
            .await?)
    }

    async fn post(
        &self,
        token: &ApiToken,
        endpoint: &str,
        body: &Value,
    ) -> Result<Response, EngineError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("POST {}", url);
        Ok(self
            .client
            .post(url)
            .headers(Self::headers(token)?)
            .json(body)
            .send()
            .await?)
    }

    /// Decode a response, mapping non-2xx bodies into the typed error
    /// vocabulary.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, EngineError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body)
                .map_err(|err| EngineError::MalformedSchema(err.to_string()));
        }

        match serde_json::from_str::<NotionErrorBody>(&body) {
            Ok(error) => Err(EngineError::NotionService {
                code: NotionErrorCode::from_api_response(&error.code),
                message: error.message,
                status: status.as_u16(),
            }),
            Err(_) => Err(EngineError::NotionService {
                code: NotionErrorCode::from_http_status(status.as_u16()),
                message: format!("HTTP {} with unparseable body", status),
                status: status.as_u16(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl SchemaSource for NotionHttpClient {
    async fn fetch_database_schema(
        &self,
        token: &ApiToken,
        database_id: &str,
    ) -> Result<RawDatabase, EngineError> {
        let endpoint = format!("databases/{}", database_id);
        let response = self.get(token, &endpoint).await?;
        Self::decode(response).await
    }
}

#[async_trait::async_trait]
impl PageWriter for NotionHttpClient {
    async fn create_page(
        &self,
        token: &ApiToken,
        database_id: &str,
        properties: Map<String, Value>,
    ) -> Result<(), EngineError> {
        let body = json!({
            "parent": {"database_id": database_id},
            "properties": properties,
        });
        let response = self.post(token, "pages", &body).await?;
        // The created page is not consumed; decoding still surfaces errors.
        let _: Value = Self::decode(response).await?;
        Ok(())
    }
}
