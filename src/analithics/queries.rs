use rusqlite::Connection;
use std::error::Error;

use crate::analithics::db::{analytics_db_path, fetch_recent_queries, open_analytics_connection};

/// Ciclos más consultados en el log (agrupando el filtro `ciclo` textual,
/// incluido el literal "all"). Devuelve un arreglo JSON ordenado por uso.
pub fn ciclos_mas_consultados(limit: Option<usize>) -> Result<serde_json::Value, Box<dyn Error>> {
    use std::collections::HashMap;
    let db_path = analytics_db_path();
    let conn = Connection::open(db_path)?;
    let mut stmt = conn.prepare("SELECT ciclo FROM queries WHERE ciclo IS NOT NULL")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in rows {
        if let Ok(c) = r {
            *counts.entry(c).or_default() += 1;
        }
    }
    let mut v: Vec<(String, usize)> = counts.into_iter().collect();
    v.sort_by(|a, b| b.1.cmp(&a.1));
    let lim = limit.unwrap_or(20);
    let arr: Vec<serde_json::Value> = v
        .into_iter()
        .take(lim)
        .map(|(c, n)| serde_json::json!({"ciclo": c, "count": n}))
        .collect();
    let result = serde_json::Value::Array(arr);
    // persist report
    let params = serde_json::json!({"limit": limit});
    let _ = crate::analithics::save_report("ciclos_mas_consultados", &params.to_string(), &result.to_string());
    Ok(result)
}

/// Últimas consultas registradas, en orden descendente por id.
pub fn consultas_recientes(limit: Option<usize>) -> Result<serde_json::Value, Box<dyn Error>> {
    let conn = open_analytics_connection()?;
    let lim = limit.unwrap_or(10) as i64;
    let rows = fetch_recent_queries(&conn, lim)?;
    let arr: Vec<serde_json::Value> = rows
        .into_iter()
        .map(|(id, ts, endpoint, ciclo, filas, duration_ms)| {
            serde_json::json!({
                "id": id,
                "ts": ts,
                "endpoint": endpoint,
                "ciclo": ciclo,
                "filas": filas,
                "duration_ms": duration_ms,
            })
        })
        .collect();
    let result = serde_json::Value::Array(arr);
    let params = serde_json::json!({"limit": limit});
    let _ = crate::analithics::save_report("consultas_recientes", &params.to_string(), &result.to_string());
    Ok(result)
}

/// Promedio de montos pagado/pendiente observados en las respuestas de
/// estadísticas registradas.
pub fn promedio_montos() -> Result<serde_json::Value, Box<dyn Error>> {
    let db_path = analytics_db_path();
    let conn = Connection::open(db_path)?;
    let mut stmt = conn.prepare(
        "SELECT total_paid, total_pending FROM queries WHERE total_paid IS NOT NULL AND total_pending IS NOT NULL",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, f64>(0)?, row.get::<_, f64>(1)?)))?;
    let mut n = 0usize;
    let mut sum_paid = 0.0f64;
    let mut sum_pending = 0.0f64;
    for r in rows {
        if let Ok((p, q)) = r {
            n += 1;
            sum_paid += p;
            sum_pending += q;
        }
    }
    let result = if n == 0 {
        serde_json::json!({"count": 0, "avg_total_paid": null, "avg_total_pending": null})
    } else {
        serde_json::json!({
            "count": n,
            "avg_total_paid": sum_paid / n as f64,
            "avg_total_pending": sum_pending / n as f64,
        })
    };
    let _ = crate::analithics::save_report("promedio_montos", "{}", &result.to_string());
    Ok(result)
}

/// Total de consultas registradas y clientes distintos.
pub fn count_queries() -> Result<serde_json::Value, Box<dyn Error>> {
    let db_path = analytics_db_path();
    let conn = Connection::open(db_path)?;
    let total: i64 = conn.query_row("SELECT COUNT(*) FROM queries", [], |row| row.get(0))?;
    let clients: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT client_ip) FROM queries WHERE client_ip IS NOT NULL",
        [],
        |row| row.get(0),
    )?;
    let result = serde_json::json!({"count_queries": total, "count_clients": clients});
    let _ = crate::analithics::save_report("count_queries", "{}", &result.to_string());
    Ok(result)
}
