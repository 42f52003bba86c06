//! Small declarative helpers shared by the workspace binaries.

#[cfg(feature = "actix")]
#[doc(hidden)]
pub use actix_web::web::ServiceConfig;

/// Generate a `pub fn routes(cfg: &mut ServiceConfig)` registering every
/// listed actix-web handler.
///
/// ```ignore
/// macros_utils::routes! {
///     route health_route,
///     route vars::vars_route,
/// }
///
/// App::new().configure(routes::routes)
/// ```
#[cfg(feature = "actix")]
#[macro_export]
macro_rules! routes {
    ($(route $handler:path),* $(,)?) => {
        pub fn routes(cfg: &mut $crate::ServiceConfig) {
            $( cfg.service($handler); )*
        }
    };
}
