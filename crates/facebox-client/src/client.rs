//! Blocking HTTP client for the facebox API.

use crate::error::ServiceError;
use crate::service::RecognitionService;
use crate::types::{CheckResponse, Face, ServiceInfo, StatusResponse};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const CHECK_FILE_NAME: &str = "image.dat";
const STATE_FILE_NAME: &str = "state.facebox";
const ACCEPT_JSON: &str = "application/json";
const ACCEPT_BINARY: &str = "application/octet-stream";

/// Client handle for one facebox instance.
///
/// One handle is opened per stage run and passed to the stage explicitly.
pub struct FaceboxClient {
    base_url: String,
    http: Client,
}

impl FaceboxClient {
    /// Create a client for the service at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a multipart POST and decode the `{success, error}` envelope.
    fn post_form(&self, path: &str, form: Form) -> Result<(), ServiceError> {
        let resp = self
            .http
            .post(self.endpoint(path))
            .header(ACCEPT, ACCEPT_JSON)
            .multipart(form)
            .send()?;
        let body: StatusResponse = ensure_success(path, resp)?.json()?;
        if !body.success {
            return Err(rejected(path, body.error));
        }
        Ok(())
    }
}

impl RecognitionService for FaceboxClient {
    fn teach(&self, image: Vec<u8>, id: &str, name: &str) -> Result<(), ServiceError> {
        tracing::debug!(id, name, bytes = image.len(), "facebox: teach");
        let form = Form::new()
            .part("file", Part::bytes(image).file_name(id.to_string()))
            .text("id", id.to_string())
            .text("name", name.to_string());
        self.post_form("/facebox/teach", form)
    }

    fn check(&self, image: Vec<u8>) -> Result<Vec<Face>, ServiceError> {
        const PATH: &str = "/facebox/check";
        tracing::debug!(bytes = image.len(), "facebox: check");
        let form = Form::new().part("file", Part::bytes(image).file_name(CHECK_FILE_NAME));
        let resp = self
            .http
            .post(self.endpoint(PATH))
            .header(ACCEPT, ACCEPT_JSON)
            .multipart(form)
            .send()?;
        let body: CheckResponse = ensure_success(PATH, resp)?.json()?;
        if !body.success {
            return Err(rejected(PATH, body.error));
        }
        Ok(body.faces.unwrap_or_default())
    }

    fn export_state(&self) -> Result<Vec<u8>, ServiceError> {
        const PATH: &str = "/facebox/state";
        let resp = self
            .http
            .get(self.endpoint(PATH))
            .header(ACCEPT, ACCEPT_BINARY)
            .send()?;
        let state = ensure_success(PATH, resp)?.bytes()?;
        tracing::debug!(bytes = state.len(), "facebox: exported state");
        Ok(state.to_vec())
    }

    fn import_state(&self, state: Vec<u8>) -> Result<(), ServiceError> {
        tracing::debug!(bytes = state.len(), "facebox: importing state");
        let form = Form::new().part("file", Part::bytes(state).file_name(STATE_FILE_NAME));
        self.post_form("/facebox/state", form)
    }

    fn info(&self) -> Result<ServiceInfo, ServiceError> {
        const PATH: &str = "/info";
        let resp = self
            .http
            .get(self.endpoint(PATH))
            .header(ACCEPT, ACCEPT_JSON)
            .send()?;
        Ok(ensure_success(PATH, resp)?.json()?)
    }
}

/// Turn a non-2xx response into [`ServiceError::Status`], keeping the body for the log.
fn ensure_success(endpoint: &str, resp: Response) -> Result<Response, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(ServiceError::Status {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body: body.trim().to_string(),
    })
}

fn rejected(endpoint: &str, message: String) -> ServiceError {
    let message = if message.is_empty() {
        "no reason given".to_string()
    } else {
        message
    };
    ServiceError::Rejected {
        endpoint: endpoint.to_string(),
        message,
    }
}
