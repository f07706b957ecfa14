use crate::backend::{
    BackendError, BackendMetrics, BodyBuffer, ColorResponder, Decision, parse_params,
};
use async_trait::async_trait;
use bytes::Bytes;
use http::{StatusCode, header};
use pingora::prelude::{HttpPeer, ProxyHttp, Session};
use pingora::{Custom, Error};
use pingora_http::ResponseHeader;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

/// Upper bound on a `/color` request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, PartialEq)]
enum Endpoint {
    Color,
    Metrics,
}

impl FromStr for Endpoint {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "/color" => Ok(Endpoint::Color),
            "/metrics" => Ok(Endpoint::Metrics),
            _ => Err("unknown endpoint"),
        }
    }
}

impl Endpoint {
    fn label(&self) -> &'static str {
        match self {
            Endpoint::Color => "/color",
            Endpoint::Metrics => "/metrics",
        }
    }
}

pub struct RequestCtx {
    pub request_id: String,
    pub started: Instant,
}

impl Default for RequestCtx {
    fn default() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            started: Instant::now(),
        }
    }
}

/// Terminal gateway serving `/color` and `/metrics`; it never proxies.
pub struct ColorGateway {
    responder: ColorResponder,
    metrics: Arc<BackendMetrics>,
}

impl ColorGateway {
    pub fn new(responder: ColorResponder, metrics: Arc<BackendMetrics>) -> Self {
        Self { responder, metrics }
    }

    async fn handle_color(
        &self,
        session: &mut Session,
        ctx: &RequestCtx,
    ) -> pingora::Result<StatusCode> {
        let body = match read_body(session, MAX_BODY_BYTES).await? {
            Ok(body) => body,
            Err(e) => {
                warn!(event = "color_rejected", request_id = %ctx.request_id, error = %e);
                return send_text(session, StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).await;
            }
        };

        let params = match parse_params(&body) {
            Ok(params) => params,
            Err(e) => {
                warn!(
                    event = "color_rejected",
                    request_id = %ctx.request_id,
                    body = %String::from_utf8_lossy(&body),
                    error = %e,
                );
                return send_text(session, StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).await;
            }
        };

        // ThreadRng is not Send; it must be gone before the next await.
        let decision: Decision = {
            let mut rng = rand::rng();
            self.responder.decide(&params, &mut rng)
        };

        if let Some(delay) = decision.delay {
            debug!(
                event = "color_delayed",
                request_id = %ctx.request_id,
                color = %decision.color,
                delay_ms = delay.as_millis() as u64,
            );
            tokio::time::sleep(delay).await;
        }

        let status = if decision.healthy {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        debug!(
            event = "color_served",
            request_id = %ctx.request_id,
            color = %decision.color,
            status = status.as_u16(),
        );

        send_text(session, status, decision.body()).await
    }

    async fn handle_metrics(&self, session: &mut Session) -> pingora::Result<StatusCode> {
        let body = self.metrics.encode().map_err(|e| {
            warn!(event = "metrics_encode_failed", error = %e);
            Error::new(Custom("metrics encoding failed"))
        })?;

        let mut resp = ResponseHeader::build(StatusCode::OK, None)?;
        resp.insert_header(header::CONTENT_TYPE, self.metrics.content_type())?;
        resp.insert_header(header::CONTENT_LENGTH, body.len().to_string())?;

        session.write_response_header(Box::new(resp), false).await?;
        session
            .write_response_body(Some(Bytes::from(body)), true)
            .await?;

        Ok(StatusCode::OK)
    }
}

#[async_trait]
impl ProxyHttp for ColorGateway {
    type CTX = RequestCtx;

    fn new_ctx(&self) -> Self::CTX {
        RequestCtx::default()
    }

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora::Result<Box<HttpPeer>> {
        Err(Error::new(Custom(
            "ColorGateway attempted to proxy upstream (bug)",
        )))
    }

    async fn request_filter(
        &self,
        session: &mut Session,
        ctx: &mut Self::CTX,
    ) -> pingora::Result<bool> {
        let path = session.req_header().uri.path().to_owned();

        let (label, status) = match path.parse::<Endpoint>() {
            Ok(endpoint @ Endpoint::Color) => {
                (endpoint.label(), self.handle_color(session, ctx).await?)
            }
            Ok(endpoint @ Endpoint::Metrics) => {
                (endpoint.label(), self.handle_metrics(session).await?)
            }
            Err(_) => {
                let status =
                    send_text(session, StatusCode::NOT_FOUND, "404 page not found\n").await?;
                ("other", status)
            }
        };

        self.metrics
            .observe(label, status.as_u16(), ctx.started.elapsed());

        Ok(true)
    }
}

/// Drain the request body. `None` when it grows past `limit`.
/// Transport failures are the outer error; an oversized body is the inner one.
async fn read_body(
    session: &mut Session,
    limit: usize,
) -> pingora::Result<Result<Bytes, BackendError>> {
    let mut body = BodyBuffer::new(limit);
    while let Some(chunk) = session.read_request_body().await? {
        if let Err(e) = body.push(&chunk) {
            return Ok(Err(e));
        }
    }
    Ok(Ok(body.finish()))
}

async fn send_text(
    session: &mut Session,
    status: StatusCode,
    body: impl Into<String>,
) -> pingora::Result<StatusCode> {
    let body: String = body.into();

    let mut resp = ResponseHeader::build(status, None)?;
    resp.insert_header(header::CONTENT_TYPE, "text/plain; charset=utf-8")?;
    resp.insert_header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")?;
    resp.insert_header(header::CONTENT_LENGTH, body.len().to_string())?;

    session.write_response_header(Box::new(resp), false).await?;
    session
        .write_response_body(Some(Bytes::from(body)), true)
        .await?;

    Ok(status)
}
