/// Middleware modules for the API server
///
/// - `cors`: CORS preflight handling and response headers
/// - `catch_panic`: panic-to-response conversion for `CatchPanicLayer`

pub mod catch_panic;
pub mod cors;
