use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use crmtx_types::{PropertyMap, Record, RecordId, ResourceType};

use crate::config::GatewayConfig;
use crate::endpoint;
use crate::error::{GatewayError, GatewayResult};
use crate::traits::{BatchOutcome, ResourceGateway};
use crate::wire::{BatchArchiveRequest, BatchResponse, BatchUpdateRequest, ObjectInput};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

/// One request handed to the transport, already carrying auth headers and
/// an encoded JSON body. The transport resolves `path` against the
/// configured base URL.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub timeout: Duration,
}

/// Status and decoded JSON body of a completed exchange.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

/// The I/O seam. Connection setup, TLS, and retry policy live behind this
/// trait; the gateway only shapes requests and interprets responses.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> GatewayResult<ApiResponse>;
}

/// [`ResourceGateway`] implementation over the CRM v3 REST API.
pub struct RestGateway<T> {
    transport: T,
    config: GatewayConfig,
}

impl<T: HttpTransport> RestGateway<T> {
    pub fn new(transport: T, config: GatewayConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn request<B: Serialize>(
        &self,
        method: Method,
        path: String,
        body: Option<&B>,
    ) -> GatewayResult<ApiRequest> {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| GatewayError::Serialization(e.to_string()))?;

        let mut headers = vec![(
            "authorization".to_owned(),
            self.config.access_token.bearer_header(),
        )];
        if body.is_some() {
            headers.push(("content-type".to_owned(), "application/json".to_owned()));
        }

        Ok(ApiRequest {
            method,
            path,
            headers,
            body,
            timeout: self.config.timeout,
        })
    }

    /// Map a non-success status to an error, attributing 404s to the
    /// record being addressed when there is one.
    fn reject(
        resource: ResourceType,
        id: Option<&RecordId>,
        response: &ApiResponse,
    ) -> GatewayError {
        let status = response.status;
        error!(%resource, status, "remote call rejected");
        match (status, id) {
            (401 | 403, _) => GatewayError::Unauthorized,
            (404, Some(id)) => GatewayError::NotFound {
                resource,
                id: id.clone(),
            },
            _ => GatewayError::Remote {
                status,
                message: remote_message(&response.body),
            },
        }
    }

    fn decode<R: DeserializeOwned>(response: ApiResponse) -> GatewayResult<R> {
        let body = response
            .body
            .ok_or_else(|| GatewayError::Serialization("empty response body".into()))?;
        serde_json::from_value(body).map_err(|e| GatewayError::Serialization(e.to_string()))
    }

    /// Interpret a batch call response, including the multi-status case.
    fn batch_outcome(
        resource: ResourceType,
        attempted: &[RecordId],
        response: ApiResponse,
    ) -> GatewayResult<BatchOutcome> {
        match response.status {
            204 => Ok(BatchOutcome::success(attempted.iter().cloned())),
            // 207 multi-status lands here too.
            200..=299 => {
                let parsed: BatchResponse = Self::decode(response)?;
                let mut outcome = parsed.outcome();
                // Archive responses list only failures; credit the rest.
                if outcome.succeeded.is_empty() {
                    outcome.succeeded = attempted
                        .iter()
                        .filter(|id| outcome.failed.iter().all(|f| &f.id != *id))
                        .cloned()
                        .collect();
                }
                Ok(outcome)
            }
            _ => Err(Self::reject(resource, None, &response)),
        }
    }
}

#[async_trait]
impl<T: HttpTransport> ResourceGateway for RestGateway<T> {
    async fn create(
        &self,
        resource: ResourceType,
        properties: PropertyMap,
    ) -> GatewayResult<Record> {
        let request = self.request(
            Method::Post,
            endpoint::collection(resource),
            Some(&ObjectInput { properties }),
        )?;
        let response = self.transport.execute(request).await?;
        if !(200..300).contains(&response.status) {
            return Err(Self::reject(resource, None, &response));
        }
        Self::decode(response)
    }

    async fn get_by_id(&self, resource: ResourceType, id: &RecordId) -> GatewayResult<Record> {
        let request =
            self.request::<()>(Method::Get, endpoint::object(resource, id), None)?;
        let response = self.transport.execute(request).await?;
        if !(200..300).contains(&response.status) {
            return Err(Self::reject(resource, Some(id), &response));
        }
        Self::decode(response)
    }

    async fn update(
        &self,
        resource: ResourceType,
        id: &RecordId,
        properties: PropertyMap,
    ) -> GatewayResult<Record> {
        let request = self.request(
            Method::Patch,
            endpoint::object(resource, id),
            Some(&ObjectInput { properties }),
        )?;
        let response = self.transport.execute(request).await?;
        if !(200..300).contains(&response.status) {
            return Err(Self::reject(resource, Some(id), &response));
        }
        Self::decode(response)
    }

    async fn batch_archive(
        &self,
        resource: ResourceType,
        ids: &[RecordId],
    ) -> GatewayResult<BatchOutcome> {
        let request = self.request(
            Method::Post,
            endpoint::batch_archive(resource),
            Some(&BatchArchiveRequest::new(ids)),
        )?;
        let response = self.transport.execute(request).await?;
        Self::batch_outcome(resource, ids, response)
    }

    async fn batch_update(
        &self,
        resource: ResourceType,
        updates: &BTreeMap<RecordId, PropertyMap>,
    ) -> GatewayResult<BatchOutcome> {
        let attempted: Vec<RecordId> = updates.keys().cloned().collect();
        let request = self.request(
            Method::Post,
            endpoint::batch_update(resource),
            Some(&BatchUpdateRequest::new(updates)),
        )?;
        let response = self.transport.execute(request).await?;
        Self::batch_outcome(resource, &attempted, response)
    }
}

fn remote_message(body: &Option<serde_json::Value>) -> String {
    body.as_ref()
        .and_then(|b| b.get("message"))
        .and_then(|m| m.as_str())
        .unwrap_or("no detail")
        .to_owned()
}
