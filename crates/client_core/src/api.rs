//! HTTP surface of the advisory service.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::ProgramId,
    error::ErrorBody,
    protocol::{RecommendRequest, RecommendResponse, SearchParams, Suggestion},
};
use tracing::debug;

use crate::{config::ClientSettings, error::ApiCallError};

#[async_trait]
pub trait AdvisorApi: Send + Sync {
    async fn search_courses(
        &self,
        program_id: &ProgramId,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Suggestion>, ApiCallError>;

    async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<RecommendResponse, ApiCallError>;
}

pub struct HttpAdvisorApi {
    http: Client,
    base_url: String,
}

impl HttpAdvisorApi {
    pub fn new(settings: &ClientSettings) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.http_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AdvisorApi for HttpAdvisorApi {
    async fn search_courses(
        &self,
        program_id: &ProgramId,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Suggestion>, ApiCallError> {
        let params = SearchParams {
            program_id: program_id.clone(),
            q: query.to_string(),
            limit,
        };
        let res = self
            .http
            .get(format!("{}/api/search", self.base_url))
            .query(&params)
            .send()
            .await
            .map_err(ApiCallError::from_reqwest)?;
        debug!(status = res.status().as_u16(), query, "search: response received");
        read_json(res).await
    }

    async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<RecommendResponse, ApiCallError> {
        let res = self
            .http
            .post(format!("{}/api/recommend", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(ApiCallError::from_reqwest)?;
        debug!(status = res.status().as_u16(), "recommend: response received");
        read_json(res).await
    }
}

async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, ApiCallError> {
    let status = res.status();
    if !status.is_success() {
        let detail = res
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message());
        return Err(ApiCallError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    let bytes = res.bytes().await.map_err(ApiCallError::from_reqwest)?;
    serde_json::from_slice(&bytes).map_err(|err| ApiCallError::Decode(err.to_string()))
}
