//! Webhook HTTP listener
//!
//! Serves the two-endpoint webhook contract on a single route:
//!
//! - `GET /?challenge=<token>` answers the upstream verification handshake
//!   by echoing the token verbatim.
//! - `POST /` takes a change notification, dispatches the named accounts,
//!   and answers 200 before any sync work happens.
//!
//! Anything else is 405. A body that fails to parse is 400; the process
//! keeps serving.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::dispatch::Dispatcher;
use crate::notification::parse_notification;

/// HTTP server receiving upstream webhook calls
pub struct WebhookServer {
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
}

impl WebhookServer {
    /// Binds the listener. Binding early makes startup failures loud and
    /// lets tests bind port 0.
    pub async fn bind(addr: &str, dispatcher: Arc<Dispatcher>) -> Result<Self> {
        let addr: SocketAddr = addr.parse().context("invalid listen address")?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        Ok(Self {
            listener,
            dispatcher,
        })
    }

    /// The bound address, useful when binding port 0.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr().context("no local address")
    }

    /// Runs the accept loop until the cancellation token fires.
    pub async fn run(self, shutdown: CancellationToken) -> Result<()> {
        info!(addr = %self.local_addr()?, "webhook server listening");

        loop {
            tokio::select! {
                result = self.listener.accept() => {
                    let (stream, _) = result?;
                    let io = TokioIo::new(stream);
                    let dispatcher = Arc::clone(&self.dispatcher);

                    tokio::spawn(async move {
                        let service = service_fn(move |req| {
                            let dispatcher = Arc::clone(&dispatcher);
                            async move { handle_request(req, dispatcher).await }
                        });

                        if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                            error!(error = %e, "webhook connection error");
                        }
                    });
                }
                _ = shutdown.cancelled() => {
                    info!("webhook server shutting down");
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Handles a single HTTP request.
async fn handle_request(
    req: Request<hyper::body::Incoming>,
    dispatcher: Arc<Dispatcher>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    match *req.method() {
        Method::GET => Ok(challenge_response(req.uri().query())),
        Method::POST => {
            let body = req.collect().await?.to_bytes();
            match parse_notification(&body) {
                Ok(accounts) => {
                    debug!(accounts = accounts.len(), "notification received");
                    dispatcher.dispatch(accounts);
                    Ok(plain(StatusCode::OK, "OK"))
                }
                Err(err) => {
                    warn!(error = %err, "rejected notification");
                    Ok(plain(StatusCode::BAD_REQUEST, "Bad Request"))
                }
            }
        }
        _ => Ok(plain(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")),
    }
}

/// Echoes the `challenge` query parameter, empty when absent.
fn challenge_response(query: Option<&str>) -> Response<Full<Bytes>> {
    let challenge = query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == "challenge")
                .map(|(_, value)| value.into_owned())
                .unwrap_or_default()
        })
        .unwrap_or_default();

    plain(StatusCode::OK, challenge)
}

fn plain(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    // Infallible: status and header are statically valid.
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(body.into()))
        .unwrap()
}
