use crate::correlation;
use crate::errors::{NotifierError, Result};
use crate::forwarder::Forwarder;
use crate::metrics_defs;
use crate::notification::ContentNotification;
use crate::upstream::UpstreamClient;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::service::Service;
use hyper::{Method, Request, Response, StatusCode};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

/// HTTP front of the notifier.
///
/// Routes `/notify` and `/__health`, and translates pipeline errors into
/// caller-facing responses. Holds no per-request state; the forwarder and
/// its client are shared across all connections.
pub struct NotifierService<C> {
    forwarder: Arc<Forwarder<C>>,
}

impl<C> NotifierService<C> {
    pub fn new(forwarder: Forwarder<C>) -> Self {
        Self {
            forwarder: Arc::new(forwarder),
        }
    }
}

impl<C: UpstreamClient + 'static> Service<Request<Incoming>> for NotifierService<C> {
    type Response = Response<Full<Bytes>>;
    type Error = NotifierError;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let forwarder = self.forwarder.clone();
        Box::pin(async move { Ok(route(forwarder, req).await) })
    }
}

async fn route<C, B>(forwarder: Arc<Forwarder<C>>, req: Request<B>) -> Response<Full<Bytes>>
where
    C: UpstreamClient,
    B: hyper::body::Body,
    B::Error: std::error::Error,
{
    match (req.method(), req.uri().path()) {
        (&Method::POST, "/notify") => {
            let started = Instant::now();
            let correlation_id = correlation::from_headers(req.headers());

            let response = match handle_notify(forwarder, req, &correlation_id).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(
                        correlation_id = %correlation_id,
                        error = %e,
                        "failed to relay notification"
                    );
                    plain_response(e.status_code(), &e.to_string())
                }
            };

            metrics::counter!(
                metrics_defs::NOTIFY_REQUESTS.name,
                "status" => response.status().as_u16().to_string()
            )
            .increment(1);
            metrics::histogram!(metrics_defs::NOTIFY_DURATION.name)
                .record(started.elapsed().as_secs_f64());

            response
        }
        (&Method::GET, "/__health") => Response::new(Full::new(Bytes::from("ok\n"))),
        _ => {
            tracing::debug!(
                method = %req.method(),
                path = %req.uri().path(),
                "no route matched"
            );
            plain_response(StatusCode::NOT_FOUND, "no route matched")
        }
    }
}

/// Reads and parses the notification, then runs the two-hop pipeline.
async fn handle_notify<C, B>(
    forwarder: Arc<Forwarder<C>>,
    req: Request<B>,
    correlation_id: &str,
) -> Result<Response<Full<Bytes>>>
where
    C: UpstreamClient,
    B: hyper::body::Body,
    B::Error: std::error::Error,
{
    let payload = req
        .into_body()
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| NotifierError::RequestBodyError(e.to_string()))?;

    let notification = ContentNotification::from_payload(&payload)?;

    forwarder
        .forward(&notification, payload, correlation_id)
        .await?;

    tracing::info!(
        correlation_id = %correlation_id,
        uuid = %notification.uuid,
        "content written"
    );
    Ok(plain_response(
        StatusCode::OK,
        &format!("Written content {}", notification.uuid),
    ))
}

fn plain_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(message.to_string())));
    *response.status_mut() = status;
    response
}
