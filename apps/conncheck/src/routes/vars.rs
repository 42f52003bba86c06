use actix_web::{HttpResponse, Responder, get, web};
use conncheck::Counters;

/// Current counters, in the layout expvar collectors expect
#[get("/debug/vars")]
pub async fn vars_route(counters: web::Data<Counters>) -> impl Responder {
    HttpResponse::Ok().json(counters.snapshot())
}
