use actix_cors::Cors;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use serde_json::json;

use crate::aggregator::{
    attendance_rows, compute_stats, course_options, cycle_options, filter_by_cycle,
    package_coverage, payment_rows, summary_rows,
};
use crate::api_json::{effective_today, CycleFilter, DashboardQuery};
use crate::models::EnrollmentRow;
use crate::server_handlers;

/// POST /dashboard/stats
/// Recibe las filas del dashboard (y filtro de ciclo opcional) y devuelve
/// el paquete de estadísticas derivadas.
async fn stats_handler(req: HttpRequest, body: web::Json<serde_json::Value>) -> impl Responder {
    let body_value = body.into_inner();
    let json_str = match serde_json::to_string(&body_value) {
        Ok(s) => s,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("invalid JSON body: {}", e)})),
    };

    let query = match crate::api_json::parse_json_input(&json_str) {
        Ok(q) => q,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };

    let start = std::time::Instant::now();
    let today = effective_today(&query);
    let filas = filter_by_cycle(&query.rows, query.ciclo);
    let stats = compute_stats(&filas, today);

    let resp = json!({"status": "ok", "total_filas": filas.len(), "stats": stats});
    log_analytics(&req, "stats", &json_str, &resp, start);
    HttpResponse::Ok().json(resp)
}

/// POST /dashboard/summary
/// Filas visibles de la pestaña Resumen (regla de exclusividad de paquete),
/// con asistencia, estado y alerta ya formateados.
async fn summary_handler(req: HttpRequest, body: web::Json<serde_json::Value>) -> impl Responder {
    let body_value = body.into_inner();
    let json_str = match serde_json::to_string(&body_value) {
        Ok(s) => s,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("invalid JSON body: {}", e)})),
    };

    let query = match crate::api_json::parse_json_input(&json_str) {
        Ok(q) => q,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };

    let start = std::time::Instant::now();
    let today = effective_today(&query);
    let filas = filter_by_cycle(&query.rows, query.ciclo);
    let coverage = package_coverage(&filas);
    let rows = summary_rows(&filas, &coverage, today);

    let resp = json!({"status": "ok", "count": rows.len(), "filas": rows});
    log_analytics(&req, "summary", &json_str, &resp, start);
    HttpResponse::Ok().json(resp)
}

/// POST /dashboard/payments
async fn payments_handler(req: HttpRequest, body: web::Json<serde_json::Value>) -> impl Responder {
    let body_value = body.into_inner();
    let json_str = match serde_json::to_string(&body_value) {
        Ok(s) => s,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("invalid JSON body: {}", e)})),
    };

    let query = match crate::api_json::parse_json_input(&json_str) {
        Ok(q) => q,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };

    let start = std::time::Instant::now();
    let filas = filter_by_cycle(&query.rows, query.ciclo);
    let coverage = package_coverage(&filas);
    let rows = payment_rows(&filas, &coverage);

    let resp = json!({"status": "ok", "count": rows.len(), "filas": rows});
    log_analytics(&req, "payments", &json_str, &resp, start);
    HttpResponse::Ok().json(resp)
}

/// POST /dashboard/attendance
/// Matrículas aceptadas con asistencia y alerta; `curso` filtra por la
/// etiqueta exacta de curso/grupo ("all" equivale a sin filtro).
async fn attendance_handler(req: HttpRequest, body: web::Json<serde_json::Value>) -> impl Responder {
    let body_value = body.into_inner();
    let json_str = match serde_json::to_string(&body_value) {
        Ok(s) => s,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("invalid JSON body: {}", e)})),
    };

    let query = match crate::api_json::parse_json_input(&json_str) {
        Ok(q) => q,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };

    let start = std::time::Instant::now();
    let today = effective_today(&query);
    let filas = filter_by_cycle(&query.rows, query.ciclo);
    let curso = query.curso.as_deref().filter(|c| *c != "all");
    let rows = attendance_rows(&filas, curso, today);

    let resp = json!({"status": "ok", "count": rows.len(), "filas": rows});
    log_analytics(&req, "attendance", &json_str, &resp, start);
    HttpResponse::Ok().json(resp)
}

/// POST /dashboard/options
/// Opciones de los selectores: ciclos sobre el arreglo completo, cursos
/// sobre el conjunto ya filtrado por ciclo (como hace la vista).
async fn options_handler(body: web::Json<serde_json::Value>) -> impl Responder {
    let body_value = body.into_inner();
    let json_str = match serde_json::to_string(&body_value) {
        Ok(s) => s,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("invalid JSON body: {}", e)})),
    };

    let query = match crate::api_json::parse_json_input(&json_str) {
        Ok(q) => q,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };

    let ciclos = cycle_options(&query.rows);
    let filas = filter_by_cycle(&query.rows, query.ciclo);
    let cursos = course_options(&filas);

    HttpResponse::Ok().json(json!({"status": "ok", "ciclos": ciclos, "cursos": cursos}))
}

/// POST /dashboard/snapshot
/// Guarda el arreglo de filas en `data/dashboard.json`, sustituyendo el
/// snapshot anterior. Acepta el arreglo directo o un objeto con `rows`.
async fn snapshot_save_handler(body: web::Json<serde_json::Value>) -> impl Responder {
    let body_value = body.into_inner();

    let rows: Vec<EnrollmentRow> = if body_value.is_array() {
        match serde_json::from_value(body_value) {
            Ok(r) => r,
            Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse rows: {}", e)})),
        }
    } else {
        let json_str = match serde_json::to_string(&body_value) {
            Ok(s) => s,
            Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("invalid JSON body: {}", e)})),
        };
        match crate::api_json::parse_json_input(&json_str) {
            Ok(q) => q.rows,
            Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
        }
    };

    match crate::snapshot::save_snapshot(&rows) {
        Ok(count) => HttpResponse::Ok().json(json!({"status": "ok", "count": count})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("failed to write snapshot: {}", e)})),
    }
}

/// Construye un `DashboardQuery` desde los parámetros de query string y el
/// snapshot guardado. Parámetros: `ciclo` ("all" o id), `curso`, `today`
/// (YYYY-MM-DD).
fn query_from_snapshot(
    qm: &std::collections::HashMap<String, String>,
) -> Result<DashboardQuery, HttpResponse> {
    let rows = match crate::snapshot::load_snapshot() {
        Ok(Some(rows)) => rows,
        Ok(None) => {
            return Err(HttpResponse::BadRequest()
                .json(json!({"error": "no snapshot stored; POST /dashboard/snapshot first"})))
        }
        Err(e) => {
            return Err(HttpResponse::InternalServerError()
                .json(json!({"error": format!("failed to read snapshot: {}", e)})))
        }
    };

    let ciclo = match qm.get("ciclo") {
        Some(s) => CycleFilter::from_value(&serde_json::Value::String(s.clone())),
        None => CycleFilter::All,
    };
    let curso = qm
        .get("curso")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let today = qm.get("today").and_then(|s| crate::models::parse_fecha(s));

    Ok(DashboardQuery { rows, ciclo, curso, today })
}

/// GET /dashboard/stats?ciclo=12&today=2026-08-06
/// Versión ligera sobre el snapshot guardado.
async fn stats_get_handler(query: web::Query<std::collections::HashMap<String, String>>) -> impl Responder {
    let qm = query.into_inner();
    let q = match query_from_snapshot(&qm) {
        Ok(q) => q,
        Err(resp) => return resp,
    };

    let today = effective_today(&q);
    let filas = filter_by_cycle(&q.rows, q.ciclo);
    let stats = compute_stats(&filas, today);
    HttpResponse::Ok().json(json!({"status": "ok", "total_filas": filas.len(), "stats": stats}))
}

/// GET /dashboard/summary?ciclo=12
async fn summary_get_handler(query: web::Query<std::collections::HashMap<String, String>>) -> impl Responder {
    let qm = query.into_inner();
    let q = match query_from_snapshot(&qm) {
        Ok(q) => q,
        Err(resp) => return resp,
    };

    let today = effective_today(&q);
    let filas = filter_by_cycle(&q.rows, q.ciclo);
    let coverage = package_coverage(&filas);
    let rows = summary_rows(&filas, &coverage, today);
    HttpResponse::Ok().json(json!({"status": "ok", "count": rows.len(), "filas": rows}))
}

/// GET /dashboard/payments?ciclo=12
async fn payments_get_handler(query: web::Query<std::collections::HashMap<String, String>>) -> impl Responder {
    let qm = query.into_inner();
    let q = match query_from_snapshot(&qm) {
        Ok(q) => q,
        Err(resp) => return resp,
    };

    let filas = filter_by_cycle(&q.rows, q.ciclo);
    let coverage = package_coverage(&filas);
    let rows = payment_rows(&filas, &coverage);
    HttpResponse::Ok().json(json!({"status": "ok", "count": rows.len(), "filas": rows}))
}

/// GET /dashboard/attendance?ciclo=12&curso=Piano%20-%20Grupo%20A
async fn attendance_get_handler(query: web::Query<std::collections::HashMap<String, String>>) -> impl Responder {
    let qm = query.into_inner();
    let q = match query_from_snapshot(&qm) {
        Ok(q) => q,
        Err(resp) => return resp,
    };

    let today = effective_today(&q);
    let filas = filter_by_cycle(&q.rows, q.ciclo);
    let curso = q.curso.as_deref().filter(|c| *c != "all");
    let rows = attendance_rows(&filas, curso, today);
    HttpResponse::Ok().json(json!({"status": "ok", "count": rows.len(), "filas": rows}))
}

/// GET /dashboard/options
async fn options_get_handler(query: web::Query<std::collections::HashMap<String, String>>) -> impl Responder {
    let qm = query.into_inner();
    let q = match query_from_snapshot(&qm) {
        Ok(q) => q,
        Err(resp) => return resp,
    };

    let ciclos = cycle_options(&q.rows);
    let filas = filter_by_cycle(&q.rows, q.ciclo);
    let cursos = course_options(&filas);
    HttpResponse::Ok().json(json!({"status": "ok", "ciclos": ciclos, "cursos": cursos}))
}

/// Registro best-effort en el log de analytics; un fallo aquí nunca afecta
/// la respuesta.
fn log_analytics(
    req: &HttpRequest,
    endpoint: &str,
    request_json: &str,
    response: &serde_json::Value,
    start: std::time::Instant,
) {
    let client_ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();
    let duration_ms = start.elapsed().as_millis() as i64;
    let response_json = response.to_string();
    if let Err(e) = crate::analithics::log_query(endpoint, request_json, &response_json, duration_ms, &client_ip) {
        log::warn!("no se pudo registrar la consulta en analytics: {}", e);
    }
}

fn build_cors() -> Cors {
    // Orígenes de desarrollo + FRONTEND_URL opcional (sin slash final)
    let mut cors = Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://localhost:5173")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://127.0.0.1:5173")
        .allow_any_method()
        .allow_any_header();
    if let Ok(front) = std::env::var("FRONTEND_URL") {
        let origin = front.trim_end_matches('/').to_string();
        if !origin.is_empty() {
            cors = cors.allowed_origin(&origin);
        }
    }
    cors
}

pub async fn run_server(bind_addr: &str) -> std::io::Result<()> {
    if let Err(e) = crate::analithics::init_db() {
        log::warn!("no se pudo inicializar la base de analytics: {}", e);
    }

    HttpServer::new(|| {
        App::new()
            .wrap(build_cors())
            .route("/dashboard/stats", web::post().to(stats_handler))
            .route("/dashboard/stats", web::get().to(stats_get_handler))
            .route("/dashboard/summary", web::post().to(summary_handler))
            .route("/dashboard/summary", web::get().to(summary_get_handler))
            .route("/dashboard/payments", web::post().to(payments_handler))
            .route("/dashboard/payments", web::get().to(payments_get_handler))
            .route("/dashboard/attendance", web::post().to(attendance_handler))
            .route("/dashboard/attendance", web::get().to(attendance_get_handler))
            .route("/dashboard/options", web::post().to(options_handler))
            .route("/dashboard/options", web::get().to(options_get_handler))
            .route("/dashboard/snapshot", web::post().to(snapshot_save_handler))
            .route("/analytics/queries/recent", web::get().to(server_handlers::recent_queries_handler))
            .route("/analytics/reports/ciclos", web::get().to(server_handlers::ciclos_report_handler))
            .route("/analytics/reports/montos", web::get().to(server_handlers::montos_report_handler))
            .route("/analytics/reports/count", web::get().to(server_handlers::count_report_handler))
            .route("/help", web::get().to(server_handlers::help_handler))
    })
    .bind(bind_addr)?
    .run()
    .await
}
