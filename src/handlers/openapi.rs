//! OpenAPI specification generation and app factory.

use crate::{
    handlers::{
        create_user, delete_user, get_metrics, get_user, health, json_error_handler, list_users,
        path_error_handler, update_user,
    },
    middleware::{MetricsMiddleware, RequestIdMiddleware, RequestIntegrity},
    state::AppState,
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the OpenAPI specification, including the request signing contract.
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Signed Users API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "CRUD API for users. Every request must carry an HMAC-SHA256 signature.\n\n\
                ## Request Signing\n\
                **Headers:**\n\
                - `X-Signature`: HMAC-SHA256 of the canonical payload, hex encoded\n\
                - `X-Timestamp`: milliseconds since the Unix epoch\n\
                \n\
                **Canonical payload:** `METHOD + PATH + TIMESTAMP + BODY` with no separators.\n\
                1. `METHOD` is the uppercased HTTP verb\n\
                2. `PATH` excludes the `/api` mount prefix, e.g. `/users/3`\n\
                3. A query string is appended as `?` plus its pairs sorted by key, as sent\n\
                4. `TIMESTAMP` is the exact `X-Timestamp` header text\n\
                5. `BODY` is the exact request body bytes; an empty body signs as nothing. \
                A body sent with `Content-Encoding` is signed in its decoded form\n\
                \n\
                Requests more than 60 seconds away from server time are rejected. Rejections \
                return `403 Forbidden`.\n\
                \n\
                **Unsigned endpoints:** health, metrics, and this specification.".into()
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the application around shared state.
///
/// Middleware order, outermost first: request id, metrics, request
/// integrity. The integrity layer therefore runs before any handler while
/// rejected requests are still counted and tagged with a request id.
///
/// The returned app owns clones of everything it needs from `state`, so it
/// can be built inside an `HttpServer` factory closure.
pub fn create_app(
    state: &AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let prefix = state.config.integrity.route_prefix.as_str();
    let integrity = RequestIntegrity::new(state.verifier.clone(), &state.config.integrity);

    App::new()
        .wrap(integrity)
        .wrap(MetricsMiddleware)
        .wrap(RequestIdMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(state.users.clone())
        .app_data(state.metrics.clone())
        .app_data(web::Data::new(state.config.metrics.clone()))
        .app_data(actix_web::web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(actix_web::web::PathConfig::default().error_handler(path_error_handler))
        .service(web::resource(&format!("{prefix}/health")).route(web::get().to(health)))
        .service(web::resource(&format!("{prefix}/metrics")).route(web::get().to(get_metrics)))
        .service(
            web::resource(&format!("{prefix}/users"))
                .route(web::get().to(list_users))
                .route(web::post().to(create_user)),
        )
        .service(
            web::resource(&format!("{prefix}/users/{{id}}"))
                .route(web::get().to(get_user))
                .route(web::put().to(update_user))
                .route(web::delete().to(delete_user)),
        )
        .with_json_spec_at(&format!("{prefix}/spec/v2"))
        .build()
}
