use actix_web::{web, HttpResponse, Responder};

/// GET /analytics/queries/recent?limit=10
/// Últimas consultas registradas en el log de analytics.
pub async fn recent_queries_handler(query: web::Query<std::collections::HashMap<String, String>>) -> impl Responder {
    let lim = query.get("limit").and_then(|s| s.parse::<usize>().ok());
    match crate::analithics::consultas_recientes(lim) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("error consultando el log de analytics: {}", e);
            HttpResponse::InternalServerError().body("error fetching recent queries")
        }
    }
}

/// GET /analytics/reports/ciclos?limit=20
/// Ciclos más consultados (incluye el literal "all").
pub async fn ciclos_report_handler(query: web::Query<std::collections::HashMap<String, String>>) -> impl Responder {
    let lim = query.get("limit").and_then(|s| s.parse::<usize>().ok());
    match crate::analithics::ciclos_mas_consultados(lim) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("error generando reporte de ciclos: {}", e);
            HttpResponse::InternalServerError().body("error building ciclos report")
        }
    }
}

/// GET /analytics/reports/montos
/// Promedio de montos pagado/pendiente observados.
pub async fn montos_report_handler() -> impl Responder {
    match crate::analithics::promedio_montos() {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("error generando reporte de montos: {}", e);
            HttpResponse::InternalServerError().body("error building montos report")
        }
    }
}

/// GET /analytics/reports/count
pub async fn count_report_handler() -> impl Responder {
    match crate::analithics::count_queries() {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("error contando consultas: {}", e);
            HttpResponse::InternalServerError().body("error counting queries")
        }
    }
}
