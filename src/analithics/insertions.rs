use crate::analithics::db::analytics_db_path;
use crate::analithics::jsonparsing::extract_parsed_fields;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::error::Error;

/// Inserta una fila en el log de consultas. Usa `extract_parsed_fields`
/// para poblar las columnas resumidas cuando es posible. Abre una conexión
/// de corta vida e inserta la fila.
pub fn log_query(
    endpoint: &str,
    request_json: &str,
    response_json: &str,
    duration_ms: i64,
    client_ip: &str,
) -> Result<(), Box<dyn Error>> {
    let db_path = analytics_db_path();
    let conn = Connection::open(db_path)?;
    let ts = Utc::now().to_rfc3339();

    // best-effort parse
    let parsed = extract_parsed_fields(request_json, response_json)?;

    conn.execute(
        "INSERT INTO queries (
            ts, duration_ms, endpoint, ciclo, curso, filas,
            total_paid, total_pending,
            request_json, response_json, client_ip
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            ts,
            duration_ms,
            endpoint,
            parsed.ciclo,
            parsed.curso,
            parsed.filas,
            parsed.total_paid,
            parsed.total_pending,
            request_json,
            response_json,
            client_ip,
        ],
    )?;
    Ok(())
}

/// Guarda el resultado de un reporte bajo la tabla `reports`.
pub fn save_report(query_type: &str, params_json: &str, result_json: &str) -> Result<(), Box<dyn Error>> {
    let db_path = analytics_db_path();
    let conn = Connection::open(db_path)?;
    let ts = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO reports (ts, query_type, params_json, result_json) VALUES (?1, ?2, ?3, ?4)",
        params![ts, query_type, params_json, result_json],
    )?;
    Ok(())
}
