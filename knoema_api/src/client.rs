//! HTTP client for the Knoema API.

use std::path::Path;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    auth::{Authenticator, CONTENT_TYPE},
    config::ClientConfig,
    multipart::FileContent,
    request::{
        DatasetUpload, DatasetVerifyRequest, JsonRequest, PivotRequest, Query, UploadStatusQuery,
        UploadVerifyQuery,
    },
    transport::{HttpMethod, HttpRequest, HttpTransport, Transport},
    types::{
        parse, DateRange, Dataset, DatasetUploadResponse, DatasetUploadStatusResponse,
        DatasetVerifyResponse, Dimension, Key, PivotResponse, UploadPostResponse,
        UploadVerifyResponse,
    },
    Error,
};

/// HTTP client for the Knoema API.
///
/// Each endpoint operation is one blocking round trip: headers are signed
/// afresh, the body is encoded, the transport is called and the response is
/// decoded into the matching read model. Nothing is retried or cached.
pub struct Client<T = HttpTransport> {
    /// Base URL for the API, e.g. `http://knoema.com`.
    base_api_url: String,
    authenticator: Authenticator,
    transport: T,
}

impl Client {
    /// Creates an unauthenticated client for the public Knoema host.
    pub fn new() -> Result<Self, Error> {
        Self::from_config(&ClientConfig::default())
    }

    /// Creates an unauthenticated client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Ok(Client::with_transport(base_url, HttpTransport::new()?))
    }

    /// Creates a client from host, credentials and timeout settings.
    pub fn from_config(config: &ClientConfig) -> Result<Self, Error> {
        let transport = HttpTransport::with_timeout(config.timeout)?;
        Ok(Client::with_transport(&config.base_url(), transport).with_authenticator(
            Authenticator::new(config.app_id.as_deref(), config.app_secret.as_deref()),
        ))
    }
}

impl<T: Transport> Client<T> {
    /// Creates an unauthenticated client that sends requests through `transport`.
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            authenticator: Authenticator::anonymous(),
            transport,
        }
    }

    /// Signs every request with the given application id and secret.
    pub fn with_credentials(self, app_id: &str, app_secret: &str) -> Self {
        self.with_authenticator(Authenticator::new(Some(app_id), Some(app_secret)))
    }

    pub fn with_authenticator(mut self, authenticator: Authenticator) -> Self {
        self.authenticator = authenticator;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    /// Joins `path` onto the base URL, then appends each of `segments` as one
    /// percent-encoded path segment.
    fn get_url(
        &self,
        path: &str,
        segments: &[&str],
        query: Option<&dyn Query>,
    ) -> Result<Url, Error> {
        let mut url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e)
        })?;
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| {
                    tracing::error!("Base URL cannot take path segments: {}", self.base_api_url);
                    Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase)
                })?
                .pop_if_empty()
                .extend(segments);
        }
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    fn execute<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, Error> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let resp = self.transport.send(request)?;

        if !resp.is_success() {
            let snippet = truncate_body(&resp.body);
            tracing::error!("Request failed with status {}: {}", resp.status, snippet);
            return Err(Error::HttpStatus {
                status: resp.status,
                body: snippet,
            });
        }

        parse::<R>(&resp.body).map_err(|e| {
            tracing::error!("Failed to parse resource: {} | body: {}", e, truncate_body(&resp.body));
            e
        })
    }

    fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        segments: &[&str],
        query: Option<&dyn Query>,
    ) -> Result<R, Error> {
        let url = self.get_url(path, segments, query)?;
        self.execute(HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: self.authenticator.headers(),
            body: None,
        })
    }

    fn post_json<R: DeserializeOwned, B: JsonRequest>(&self, path: &str, body: &B) -> Result<R, Error> {
        let url = self.get_url(path, &[], None)?;
        let body = body.to_json()?;
        self.execute(HttpRequest {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers: self.authenticator.headers(),
            body: Some(body.into_bytes()),
        })
    }

    /// Fetches a dataset description by its id.
    pub fn get_dataset(&self, dataset: &str) -> Result<Dataset, Error> {
        self.get("/api/1.0/meta/dataset", &[dataset], None)
    }

    /// Fetches a dimension of a dataset together with its members.
    pub fn get_dimension(&self, dataset: &str, dimension: &str) -> Result<Dimension, Error> {
        self.get("/api/1.0/meta/dataset", &[dataset, "dimension", dimension], None)
    }

    /// Fetches the date range and frequencies covered by a dataset.
    pub fn get_daterange(&self, dataset: &str) -> Result<DateRange, Error> {
        self.get("/api/1.0/meta/dataset", &[dataset, "daterange"], None)
    }

    /// Runs a pivot query.
    pub fn get_data(&self, request: &PivotRequest) -> Result<PivotResponse, Error> {
        self.post_json("/api/1.0/data/pivot/", request)
    }

    /// Posts a local file. The file is read and closed before the request is sent.
    pub fn upload_file(&self, path: impl AsRef<Path>) -> Result<UploadPostResponse, Error> {
        let content = FileContent::from_path(path)?;
        self.upload_file_content(&content)
    }

    /// Posts an already encoded file.
    pub fn upload_file_content(&self, content: &FileContent) -> Result<UploadPostResponse, Error> {
        let url = self.get_url("/api/1.0/upload/post", &[], None)?;
        let mut headers = self.authenticator.headers();
        headers.retain(|(name, _)| name != CONTENT_TYPE);
        headers.push((CONTENT_TYPE.to_string(), content.content_type()));
        self.execute(HttpRequest {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers,
            body: Some(content.to_bytes()),
        })
    }

    /// Verifies a posted file, optionally against an existing dataset.
    pub fn upload_verify(
        &self,
        file_location: &str,
        dataset: Option<&str>,
    ) -> Result<UploadVerifyResponse, Error> {
        let mut query = UploadVerifyQuery::new(file_location);
        if let Some(dataset) = dataset.filter(|d| !d.is_empty()) {
            query = query.with_dataset(dataset);
        }
        self.get("/api/1.0/upload/verify", &[], Some(&query))
    }

    /// Commits a verified upload as a dataset.
    pub fn upload_submit(&self, request: &DatasetUpload) -> Result<DatasetUploadResponse, Error> {
        self.post_json("/api/1.0/upload/save", request)
    }

    /// Checks the processing status of a submitted upload.
    pub fn upload_status(
        &self,
        submit_id: impl Into<Key>,
    ) -> Result<DatasetUploadStatusResponse, Error> {
        let query = UploadStatusQuery::new(submit_id);
        self.get("/api/1.0/upload/status", &[], Some(&query))
    }

    /// Checks dataset metadata (publication date, source, reference URL).
    pub fn verify_dataset(
        &self,
        request: &DatasetVerifyRequest,
    ) -> Result<DatasetVerifyResponse, Error> {
        self.post_json("/api/1.0/meta/verifydataset", request)
    }

    /// Posts, verifies and submits a file in one go.
    ///
    /// Fails with [`Error::UploadRejected`] when the post or verify step
    /// reports failure. Polling [`Client::upload_status`] is left to the caller.
    pub fn upload_dataset(
        &self,
        path: impl AsRef<Path>,
        dataset: Option<&str>,
        public: bool,
    ) -> Result<DatasetUploadResponse, Error> {
        let posted = self.upload_file(path)?;
        if !posted.successful {
            tracing::error!("Upload post rejected: {:?}", posted.error);
            return Err(Error::UploadRejected {
                errors: posted.error.map(|e| vec![serde_json::Value::String(e)]),
            });
        }
        let location = posted.properties.location.as_deref().ok_or_else(|| {
            Error::Validation("upload response carries no file location".to_string())
        })?;

        let verified = self.upload_verify(location, dataset)?;
        if !verified.successful {
            tracing::error!("Upload verification rejected: {:?}", verified.errors);
            return Err(Error::UploadRejected {
                errors: verified.errors,
            });
        }

        let request = DatasetUpload::from_results(&verified, &posted, dataset, public);
        self.upload_submit(&request)
    }
}

fn truncate_body(body: &[u8]) -> String {
    const MAX: usize = 2000;
    let text = String::from_utf8_lossy(body);
    if text.len() <= MAX {
        return text.into_owned();
    }
    let mut end = MAX;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &text[..end])
}
