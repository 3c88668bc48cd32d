//! Request integrity middleware.
//!
//! Runs in front of every route except the configured bypass paths. Header
//! presence and freshness are checked first, so unsigned or stale requests
//! are rejected without reading the body. Otherwise the body is read once,
//! verified, and handed back to the request so the handler parses exactly
//! the bytes that were signed. Any rejection ends the request with 403
//! before the handler runs.

use crate::{
    config::IntegrityConfig,
    error::{ErrorBody, IntegrityError},
    models::{
        audit::IntegrityAuditEvent,
        integrity::{SIGNATURE_HEADER, SignedRequest, TIMESTAMP_HEADER, VerificationResult},
    },
    middleware::request_id::RequestId,
    services::{AppMetrics, SignatureVerifier},
    utils::{
        canonical::canonical_path,
        http::{extract_client_ip, extract_user_agent, header_text},
    },
};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::{BoxBody, MessageBody},
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::StatusCode,
    web,
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    rc::Rc,
};

/// Message returned for every rejection when rejections are uniform.
pub const UNIFORM_REJECTION_MESSAGE: &str = "Request integrity check failed";

struct IntegrityPolicy {
    verifier: SignatureVerifier,
    route_prefix: String,
    uniform_rejections: bool,
    bypass_paths: Vec<String>,
}

impl IntegrityPolicy {
    fn is_bypassed(&self, path: &str) -> bool {
        self.bypass_paths.iter().any(|p| p == path)
    }

    fn rejection_response(&self, error: IntegrityError) -> HttpResponse {
        let message = if self.uniform_rejections {
            UNIFORM_REJECTION_MESSAGE.to_string()
        } else {
            error.to_string()
        };
        HttpResponse::Forbidden().json(ErrorBody::new(StatusCode::FORBIDDEN, message))
    }

    /// Audit and count one decision.
    fn record(
        &self,
        req: &ServiceRequest,
        outcome: VerificationResult,
        timestamp: Option<String>,
    ) {
        let http_req = req.request();
        IntegrityAuditEvent::new(
            outcome,
            extract_client_ip(http_req),
            http_req.method().to_string(),
            http_req.path().to_string(),
        )
        .with_user_agent(extract_user_agent(http_req))
        .with_declared_timestamp(timestamp)
        .with_request_id(req.extensions().get::<RequestId>().map(|id| id.0.clone()))
        .log();

        if let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() {
            metrics.record_verification(outcome.as_str());
        }
    }
}

/// Request integrity middleware factory
pub struct RequestIntegrity {
    policy: Rc<IntegrityPolicy>,
}

impl RequestIntegrity {
    pub fn new(verifier: SignatureVerifier, config: &IntegrityConfig) -> Self {
        Self {
            policy: Rc::new(IntegrityPolicy {
                verifier,
                route_prefix: config.route_prefix.clone(),
                uniform_rejections: config.uniform_rejections,
                bypass_paths: config.bypass_paths.clone(),
            }),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestIntegrity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIntegrityService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIntegrityService {
            service: Rc::new(service),
            policy: Rc::clone(&self.policy),
        }))
    }
}

/// The actual request integrity middleware service
pub struct RequestIntegrityService<S> {
    service: Rc<S>,
    policy: Rc<IntegrityPolicy>,
}

impl<S, B> Service<ServiceRequest> for RequestIntegrityService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let policy = Rc::clone(&self.policy);

        Box::pin(async move {
            if policy.is_bypassed(req.path()) {
                let res = service.call(req).await?;
                return Ok(res.map_into_boxed_body());
            }

            let signature = header_text(req.request(), SIGNATURE_HEADER).map(str::to_string);
            let timestamp = header_text(req.request(), TIMESTAMP_HEADER).map(str::to_string);

            // Missing or stale headers are rejected before any body I/O
            let outcome = match policy
                .verifier
                .check_headers(signature.as_deref(), timestamp.as_deref())
            {
                Err(error) => VerificationResult::from(Err(error)),
                Ok(()) => {
                    let body = req.extract::<web::Bytes>().await?;
                    let http_req = req.request();
                    let path = canonical_path(
                        http_req.path(),
                        http_req.query_string(),
                        &policy.route_prefix,
                    );
                    let signed =
                        SignedRequest::new(http_req.method().as_str(), path, body.clone())
                            .with_timestamp(timestamp.as_deref())
                            .with_signature(signature.as_deref());

                    let outcome =
                        VerificationResult::from(policy.verifier.check_signature(&signed));
                    if outcome.is_accepted() {
                        req.set_payload(Payload::from(body));
                    }
                    outcome
                }
            };

            policy.record(&req, outcome, timestamp);

            match outcome.rejection() {
                None => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_boxed_body())
                }
                Some(error) => Ok(req.into_response(policy.rejection_response(error))),
            }
        })
    }
}
