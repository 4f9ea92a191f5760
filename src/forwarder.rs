use crate::config::Config;
use crate::correlation::REQUEST_ID_HEADER;
use crate::errors::{NotifierError, Result, UpstreamService};
use crate::notification::ContentNotification;
use crate::upstream::UpstreamClient;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{CONTENT_TYPE, HOST};
use hyper::{Method, Request, StatusCode};
use url::Url;

/// The two-hop relay pipeline: the original payload goes to the mapper, the
/// mapped body goes to the store writer.
///
/// The sequence stops at the first failed hop. Nothing is retried, and a
/// mapper side effect is not undone if the store write fails afterwards.
pub struct Forwarder<C> {
    config: Config,
    client: C,
}

impl<C: UpstreamClient> Forwarder<C> {
    pub fn new(config: Config, client: C) -> Self {
        Self { config, client }
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &C {
        &self.client
    }

    pub async fn forward(
        &self,
        notification: &ContentNotification,
        payload: Bytes,
        correlation_id: &str,
    ) -> Result<()> {
        let mapper_request = build_request(
            Method::POST,
            self.config.mapper_url(),
            UpstreamService::Mapper,
            correlation_id,
            payload,
        )?;
        let mapper_response = self
            .client
            .execute(UpstreamService::Mapper, mapper_request)
            .await?;
        if mapper_response.status() != StatusCode::OK {
            return Err(NotifierError::UnexpectedStatus(
                UpstreamService::Mapper,
                mapper_response.status(),
            ));
        }

        let store_request = build_request(
            Method::PUT,
            self.config.store_url(&notification.uuid)?,
            UpstreamService::StoreWriter,
            correlation_id,
            mapper_response.into_body(),
        )?;
        let store_response = self
            .client
            .execute(UpstreamService::StoreWriter, store_request)
            .await?;
        // The store writer acknowledges with 201, not 200; its contract
        // differs from the mapper's.
        if store_response.status() != StatusCode::CREATED {
            return Err(NotifierError::UnexpectedStatus(
                UpstreamService::StoreWriter,
                store_response.status(),
            ));
        }

        Ok(())
    }
}

/// Builds one outbound request through the routing layer, addressed to a
/// logical service via the virtual `Host` header.
fn build_request(
    method: Method,
    url: Url,
    service: UpstreamService,
    correlation_id: &str,
    body: Bytes,
) -> Result<Request<Full<Bytes>>> {
    Request::builder()
        .method(method)
        .uri(url.as_str())
        .header(HOST, service.virtual_host())
        .header(REQUEST_ID_HEADER, correlation_id)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(body))
        .map_err(|e| {
            NotifierError::InternalError(format!("failed to build {service} request: {e}"))
        })
}
