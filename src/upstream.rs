use crate::errors::{NotifierError, Result, UpstreamService};
use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;

/// One-method client abstraction over the routing layer.
///
/// The forwarding pipeline only ever executes a request and looks at the
/// response, so this is the whole seam needed to substitute fakes in tests.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Executes the request and returns the response with its body
    /// collected into bytes.
    async fn execute(
        &self,
        service: UpstreamService,
        request: Request<Full<Bytes>>,
    ) -> Result<Response<Bytes>>;
}

/// Production client over a shared hyper connection pool.
///
/// No timeout is layered on top of the client defaults; a hung collaborator
/// blocks its request until the peer or the caller gives up.
#[derive(Clone)]
pub struct HttpUpstreamClient {
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HttpUpstreamClient {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }
}

impl Default for HttpUpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn execute(
        &self,
        service: UpstreamService,
        request: Request<Full<Bytes>>,
    ) -> Result<Response<Bytes>> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| NotifierError::UpstreamRequestFailed(service, e.to_string()))?;

        let (parts, body) = response.into_parts();
        let body_bytes = body
            .collect()
            .await
            .map(|collected| collected.to_bytes())
            .map_err(|e| NotifierError::ResponseBodyError(service, e.to_string()))?;

        Ok(Response::from_parts(parts, body_bytes))
    }
}
