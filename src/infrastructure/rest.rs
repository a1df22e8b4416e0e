//! Job client speaking the dispatcher's REST dialect
//!
//! Resources below the service endpoint:
//! - `POST run` (form fields) -> job id as plain text
//! - `GET status/<job>` -> status as plain text
//! - `GET resulttypes/<job>` -> `{"types": [...]}`
//! - `GET result/<job>/<type>` -> raw result bytes
//! - `GET parameters` -> `{"parameters": [...]}`
//! - `GET parameterdetails/<name>` -> parameter description

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, trace};

use crate::domain::{JobStatus, ParamDetail, ParamValue, ResultType, SubmitRequest};
use crate::infrastructure::traits::JobClient;
use crate::infrastructure::{InfraError, InfraResult};
use crate::{CLIENT_NAME, CLIENT_VERSION};

/// Public Wise2DBA service endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.ebi.ac.uk/Tools/services/rest/wise2dba";

/// Longest error body echoed back in an error message.
const MAX_ERROR_BODY: usize = 200;

/// Blocking HTTP implementation of [`JobClient`].
#[derive(Debug)]
pub struct RestJobClient {
    http: Client,
    base: Url,
}

impl RestJobClient {
    pub fn new(endpoint: &str, timeout: Duration) -> InfraResult<Self> {
        let base = Url::parse(endpoint.trim_end_matches('/')).map_err(|e| {
            InfraError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }
        })?;
        if base.cannot_be_a_base() {
            return Err(InfraError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: "not a hierarchical URL".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(format!("{}/{}", CLIENT_NAME, CLIENT_VERSION))
            .build()
            .map_err(|e| InfraError::http(endpoint, e))?;

        Ok(Self { http, base })
    }

    /// Resource URL below the endpoint; segments are percent-encoded.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn send(&self, url: &Url, request: RequestBuilder) -> InfraResult<Response> {
        debug!(%url, "sending request");
        let response = request
            .send()
            .map_err(|e| InfraError::http(url.as_str(), e))?;
        trace!(%url, status = %response.status(), "received response");
        check_status(url, response)
    }

    fn get_text(&self, url: &Url) -> InfraResult<String> {
        let response = self.send(url, self.http.get(url.clone()))?;
        response
            .text()
            .map_err(|e| InfraError::http(url.as_str(), e))
    }

    fn get_json<T: DeserializeOwned>(&self, url: &Url) -> InfraResult<T> {
        let request = self.http.get(url.clone()).header(ACCEPT, "application/json");
        let body = self
            .send(url, request)?
            .text()
            .map_err(|e| InfraError::http(url.as_str(), e))?;
        decode(url, &body)
    }
}

fn check_status(url: &Url, response: Response) -> InfraResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(InfraError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// First line of an error body, truncated.
fn error_message(body: &str) -> String {
    let line = body.lines().map(str::trim).find(|l| !l.is_empty());
    match line {
        Some(line) if line.chars().count() > MAX_ERROR_BODY => {
            let cut: String = line.chars().take(MAX_ERROR_BODY).collect();
            format!("{cut}...")
        }
        Some(line) => line.to_string(),
        None => "no response body".to_string(),
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> InfraResult<T> {
    serde_json::from_str(body).map_err(|e| InfraError::Decode {
        url: url.to_string(),
        source: e,
    })
}

impl JobClient for RestJobClient {
    #[instrument(skip(self, request))]
    fn submit(&self, request: &SubmitRequest<'_>) -> InfraResult<String> {
        let url = self.url(&["run"]);
        let fields = request.form_fields();
        debug!(fields = ?fields.iter().map(|(k, _)| *k).collect::<Vec<_>>(), "submitting");
        let response = self.send(&url, self.http.post(url.clone()).form(&fields))?;
        let job_id = response
            .text()
            .map_err(|e| InfraError::http(url.as_str(), e))?;
        Ok(job_id.trim().to_string())
    }

    #[instrument(skip(self))]
    fn status(&self, job_id: &str) -> InfraResult<JobStatus> {
        let text = self.get_text(&self.url(&["status", job_id]))?;
        Ok(JobStatus::parse(&text))
    }

    #[instrument(skip(self))]
    fn result_types(&self, job_id: &str) -> InfraResult<Vec<ResultType>> {
        let wire: WireResultTypes = self.get_json(&self.url(&["resulttypes", job_id]))?;
        Ok(wire.types.into_iter().map(ResultType::from).collect())
    }

    #[instrument(skip(self))]
    fn result(&self, job_id: &str, type_id: &str) -> InfraResult<Vec<u8>> {
        let url = self.url(&["result", job_id, type_id]);
        let response = self.send(&url, self.http.get(url.clone()))?;
        let bytes = response
            .bytes()
            .map_err(|e| InfraError::http(url.as_str(), e))?;
        Ok(bytes.to_vec())
    }

    #[instrument(skip(self))]
    fn parameters(&self) -> InfraResult<Vec<String>> {
        let wire: WireParameters = self.get_json(&self.url(&["parameters"]))?;
        Ok(wire.parameters)
    }

    #[instrument(skip(self))]
    fn parameter_detail(&self, name: &str) -> InfraResult<ParamDetail> {
        let wire: WireParamDetail = self.get_json(&self.url(&["parameterdetails", name]))?;
        Ok(wire.into())
    }
}

// ============================================================
// WIRE FORMAT
// ============================================================

#[derive(Debug, Deserialize)]
struct WireParameters {
    #[serde(default)]
    parameters: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WireResultTypes {
    #[serde(default)]
    types: Vec<WireResultType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResultType {
    identifier: String,
    label: Option<String>,
    description: Option<String>,
    media_type: Option<String>,
    file_suffix: Option<String>,
}

impl From<WireResultType> for ResultType {
    fn from(w: WireResultType) -> Self {
        Self {
            identifier: w.identifier,
            label: w.label,
            description: w.description,
            media_type: w.media_type,
            file_suffix: w.file_suffix,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireParamDetail {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    values: Option<WireParamValues>,
}

#[derive(Debug, Deserialize)]
struct WireParamValues {
    #[serde(default)]
    values: Vec<WireParamValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireParamValue {
    label: Option<String>,
    value: String,
    #[serde(default)]
    default_value: bool,
}

impl From<WireParamDetail> for ParamDetail {
    fn from(w: WireParamDetail) -> Self {
        let values = w
            .values
            .map(|v| v.values)
            .unwrap_or_default()
            .into_iter()
            .map(|v| ParamValue {
                value: v.value,
                label: v.label,
                default: v.default_value,
            })
            .collect();
        Self {
            name: w.name,
            kind: w.kind,
            description: w.description,
            values,
        }
    }
}
