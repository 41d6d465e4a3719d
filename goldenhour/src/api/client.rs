//! Dispatch API trait and reqwest implementation.
//!
//! The [`DispatchApi`] trait abstracts the backend's REST surface so the
//! polling daemons can be exercised with mock clients in tests. The
//! [`HttpDispatchApi`] implementation talks to a real backend via a reusable
//! `reqwest::Client` with connection pooling and a request timeout.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ApiError;
use super::types::{
    AmbulanceLocation, EmergencyStatus, HospitalListResponse, HospitalSummary, NotifyReceipt,
    NotifyRequest, TriageRequest, TriageResponse,
};

/// Default timeout applied to every backend request.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait for the dispatch backend's REST operations.
///
/// One method per endpoint. Implementations must be cheap to share across
/// the status poller and both refresher daemons.
pub trait DispatchApi: Send + Sync {
    /// `POST /triage` - submit patient data, receive an emergency id.
    fn submit_triage(
        &self,
        request: &TriageRequest,
    ) -> impl Future<Output = Result<TriageResponse, ApiError>> + Send;

    /// `GET /status/{emergencyId}` - current dispatch state.
    fn fetch_status(
        &self,
        emergency_id: &str,
    ) -> impl Future<Output = Result<EmergencyStatus, ApiError>> + Send;

    /// `GET /hospitals/{emergencyId}` - candidate hospitals with distance/ETA.
    fn fetch_hospitals(
        &self,
        emergency_id: &str,
    ) -> impl Future<Output = Result<HospitalListResponse, ApiError>> + Send;

    /// `GET /hospitals/{emergencyId}/selected` - the assigned hospital.
    fn fetch_selected_hospital(
        &self,
        emergency_id: &str,
    ) -> impl Future<Output = Result<HospitalSummary, ApiError>> + Send;

    /// `GET /ambulance/{emergencyId}` - latest ambulance fix.
    fn fetch_ambulance(
        &self,
        emergency_id: &str,
    ) -> impl Future<Output = Result<AmbulanceLocation, ApiError>> + Send;

    /// `POST /notify` - notify a hospital about an emergency.
    fn notify_hospital(
        &self,
        request: &NotifyRequest,
    ) -> impl Future<Output = Result<NotifyReceipt, ApiError>> + Send;
}

/// Real dispatch API client backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpDispatchApi {
    /// Reusable HTTP client with connection pooling.
    http: reqwest::Client,

    /// Backend base URL without trailing slash.
    base_url: String,
}

impl HttpDispatchApi {
    /// Creates a client for the given backend base URL with the default
    /// request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Http(format!("Failed to create HTTP client: {}", e)))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { http, base_url })
    }

    /// The configured backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await?;

        decode(path, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.post(&url).json(body).send().await?;

        decode(path, response).await
    }
}

/// Check the HTTP status and deserialize the body.
async fn decode<T: DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Backend {
            status: status.as_u16(),
            path: path.to_string(),
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Json {
        path: path.to_string(),
        message: e.to_string(),
    })
}

impl DispatchApi for HttpDispatchApi {
    async fn submit_triage(&self, request: &TriageRequest) -> Result<TriageResponse, ApiError> {
        self.post_json("/triage", request).await
    }

    async fn fetch_status(&self, emergency_id: &str) -> Result<EmergencyStatus, ApiError> {
        self.get_json(&format!("/status/{}", emergency_id)).await
    }

    async fn fetch_hospitals(
        &self,
        emergency_id: &str,
    ) -> Result<HospitalListResponse, ApiError> {
        self.get_json(&format!("/hospitals/{}", emergency_id)).await
    }

    async fn fetch_selected_hospital(
        &self,
        emergency_id: &str,
    ) -> Result<HospitalSummary, ApiError> {
        self.get_json(&format!("/hospitals/{}/selected", emergency_id))
            .await
    }

    async fn fetch_ambulance(&self, emergency_id: &str) -> Result<AmbulanceLocation, ApiError> {
        self.get_json(&format!("/ambulance/{}", emergency_id)).await
    }

    async fn notify_hospital(&self, request: &NotifyRequest) -> Result<NotifyReceipt, ApiError> {
        self.post_json("/notify", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let api = HttpDispatchApi::new("http://localhost:8000/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000");

        let api = HttpDispatchApi::new("http://localhost:8000").unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000");
    }
}
