//! Liveness endpoint.

/// GET /
///
/// Plain liveness string.
pub async fn home() -> &'static str {
    "Corvus API is up"
}
