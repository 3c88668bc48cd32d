//! Route pattern extraction utilities.

use actix_web::HttpRequest;

/// Label used for requests that match no registered resource.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Extract the registered route pattern for a request.
///
/// `/api/users/42` is reported as `/api/users/{id}` so metric labels stay
/// bounded. Unknown paths collapse into a single label.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}
