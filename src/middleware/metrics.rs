//! Metrics collection middleware.

use crate::{services::AppMetrics, utils::route::extract_route_pattern};
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    time::Instant,
};

/// Metrics middleware factory
///
/// Records response times, status codes, and request counts, including
/// requests rejected by the integrity layer.
pub struct MetricsMiddleware;

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsService { service }))
    }
}

/// The actual metrics middleware service
pub struct MetricsService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MetricsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start_time = Instant::now();
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            let duration = start_time.elapsed();

            // Rejected requests are labelled by the route they targeted
            let request = res.request();
            if let Some(metrics) = request.app_data::<web::Data<AppMetrics>>() {
                let route = extract_route_pattern(request);
                metrics.record_request(
                    request.method().as_str(),
                    &route,
                    res.status().as_u16(),
                    duration,
                );
            }

            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test};

    #[actix_web::test]
    async fn records_matched_route_pattern() {
        let metrics = web::Data::new(AppMetrics::new().unwrap());
        let app = test::init_service(
            App::new()
                .wrap(MetricsMiddleware)
                .app_data(metrics.clone())
                .route("/api/users/{id}", web::get().to(HttpResponse::NotFound)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/users/7").to_request();
        test::call_service(&app, req).await;

        let rendered = metrics.render().unwrap();
        assert!(rendered.contains(
            r#"http_requests_total{method="GET",route="/api/users/{id}",status="404"} 1"#
        ));
    }
}
