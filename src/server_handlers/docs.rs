use actix_web::{HttpResponse, Responder};
use chrono::NaiveDate;
use serde_json::json;

use crate::api_json::{CycleFilter, DashboardQuery};
use crate::models::{EnrollmentRow, EnrollmentStatus, EnrollmentType};

pub async fn help_handler() -> impl Responder {
    // Ejemplo de DashboardQuery mostrando el formato esperado por los POST
    let example = DashboardQuery {
        rows: vec![EnrollmentRow {
            student_id: 7,
            enrollment_id: 31,
            cycle_id: Some(2),
            cycle_name: Some("Ciclo Verano 2026".to_string()),
            student_name: Some("María Quispe".to_string()),
            dni: Some("74381920".to_string()),
            enrollment_type: EnrollmentType::Package,
            enrolled_item: Some("Paquete Intensivo".to_string()),
            grupo: Some("A".to_string()),
            enrollment_status: EnrollmentStatus::Aceptado,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 5),
            attendance_pct: 88.5,
            total_paid: 350.0,
            total_pending: 0.0,
            pending_installments: 0,
            next_due_date: None,
            alert_status: None,
        }],
        ciclo: CycleFilter::All,
        curso: None,
        today: NaiveDate::from_ymd_opt(2026, 8, 6),
    };

    let help = json!({
        "description": "API del dashboard administrativo. Los POST /dashboard/* aceptan un JSON con las filas tal como las entrega GET /api/admin/dashboard del backend (ver 'post_example'); los GET computan sobre el último snapshot guardado con POST /dashboard/snapshot.",
        "post_example": example,
        "get_example_query": "/dashboard/stats?ciclo=2&today=2026-08-06",
        "endpoints": [
            "POST|GET /dashboard/stats",
            "POST|GET /dashboard/summary",
            "POST|GET /dashboard/payments",
            "POST|GET /dashboard/attendance",
            "POST|GET /dashboard/options",
            "POST /dashboard/snapshot",
            "GET /analytics/queries/recent",
            "GET /analytics/reports/ciclos",
            "GET /analytics/reports/montos",
            "GET /analytics/reports/count"
        ],
        "note": "ciclo acepta 'all' o un id; curso es la etiqueta exacta ('Piano - Grupo A'); today permite fijar la fecha de referencia para respuestas deterministas.",
        "note_montos": "Regla de paquete: si un alumno tiene paquete en un ciclo, sus cursos de ese ciclo no suman ni se muestran aparte."
    });

    HttpResponse::Ok().json(help)
}
