use crate::errors::{Result, UpstreamService};
use crate::upstream::UpstreamClient;
use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::HeaderMap;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::sync::Mutex;
use tokio::net::TcpListener;

/// One upstream exchange observed by the fake client.
pub struct RecordedCall {
    pub service: UpstreamService,
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Scripted stand-in for the routing layer.
///
/// Responses are consumed in call order; every request is recorded for
/// assertions. Running out of scripted responses panics, which catches
/// calls that should never have been made.
pub struct FakeUpstreamClient {
    responses: Mutex<VecDeque<Result<Response<Bytes>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeUpstreamClient {
    pub fn new(responses: Vec<Result<Response<Bytes>>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn take_calls(&self) -> Vec<RecordedCall> {
        std::mem::take(&mut self.calls.lock().unwrap())
    }
}

#[async_trait]
impl UpstreamClient for FakeUpstreamClient {
    async fn execute(
        &self,
        service: UpstreamService,
        request: Request<Full<Bytes>>,
    ) -> Result<Response<Bytes>> {
        let (parts, body) = request.into_parts();
        let body_bytes = body.collect().await.unwrap().to_bytes();

        self.calls.lock().unwrap().push(RecordedCall {
            service,
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body: body_bytes,
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left for upstream call")
    }
}

pub fn response(status: StatusCode, body: &str) -> Response<Bytes> {
    let mut response = Response::new(Bytes::from(body.to_string()));
    *response.status_mut() = status;
    response
}

pub fn ok_response(body: &str) -> Response<Bytes> {
    response(StatusCode::OK, body)
}

/// Starts an in-process server that plays both collaborators: `POST /map`
/// answers 200 with `mapped_body`, any `PUT` answers `store_status`.
/// Returns the bound port.
pub async fn start_collaborator(mapped_body: &'static str, store_status: StatusCode) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind collaborator server");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            let io = TokioIo::new(stream);

            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| async move {
                    let response = match (req.method(), req.uri().path()) {
                        (&Method::POST, "/map") => {
                            Response::new(Full::new(Bytes::from_static(mapped_body.as_bytes())))
                        }
                        (&Method::PUT, _) => {
                            let mut response = Response::new(Full::new(Bytes::new()));
                            *response.status_mut() = store_status;
                            response
                        }
                        _ => {
                            let mut response = Response::new(Full::new(Bytes::new()));
                            *response.status_mut() = StatusCode::NOT_FOUND;
                            response
                        }
                    };
                    Ok::<_, Infallible>(response)
                });

                let _ = hyper_util::server::conn::auto::Builder::new(TokioExecutor::new())
                    .serve_connection(io, service)
                    .await;
            });
        }
    });

    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    port
}
