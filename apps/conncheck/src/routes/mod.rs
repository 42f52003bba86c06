mod health;
mod vars;

macros_utils::routes! {
    route health::health_route,
    route vars::vars_route,
}
