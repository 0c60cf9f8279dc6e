use serde_json::Value as JsonValue;
use std::error::Error;

use crate::api_json::{CycleFilter, DashboardQuery};

/// ParsedFields representa el subconjunto de campos que persistimos de una
/// consulta al dashboard.
pub struct ParsedFields {
    pub ciclo: Option<String>,
    pub curso: Option<String>,
    pub filas: Option<i64>,
    pub total_paid: Option<f64>,
    pub total_pending: Option<f64>,
}

fn ciclo_as_text(ciclo: CycleFilter) -> String {
    match ciclo {
        CycleFilter::All => "all".to_string(),
        CycleFilter::Cycle(id) => id.to_string(),
    }
}

/// Intenta parsear `request_json` como `DashboardQuery` y extraer campos
/// resumidos; si falla cae a extracción heurística sobre el JSON crudo.
/// Los totales se leen de la respuesta (clave `stats` o nivel superior).
pub fn extract_parsed_fields(
    request_json: &str,
    response_json: &str,
) -> Result<ParsedFields, Box<dyn Error>> {
    let mut pf = ParsedFields {
        ciclo: None,
        curso: None,
        filas: None,
        total_paid: None,
        total_pending: None,
    };

    if let Ok(parsed) = serde_json::from_str::<DashboardQuery>(request_json) {
        pf.ciclo = Some(ciclo_as_text(parsed.ciclo));
        pf.curso = parsed.curso;
        pf.filas = Some(parsed.rows.len() as i64);
    } else if let Ok(v) = serde_json::from_str::<JsonValue>(request_json) {
        // fallback: heuristic extraction
        if let Some(c) = v.get("ciclo") {
            pf.ciclo = Some(ciclo_as_text(CycleFilter::from_value(c)));
        }
        if let Some(c) = v.get("curso").and_then(|x| x.as_str()) {
            pf.curso = Some(c.to_string());
        }
        if let Some(rows) = v.get("rows").and_then(|x| x.as_array()) {
            pf.filas = Some(rows.len() as i64);
        }
    }

    if let Ok(v) = serde_json::from_str::<JsonValue>(response_json) {
        let stats = v.get("stats").unwrap_or(&v);
        if let Some(p) = stats.get("total_paid").and_then(|x| x.as_f64()) {
            pf.total_paid = Some(p);
        }
        if let Some(p) = stats.get("total_pending").and_then(|x| x.as_f64()) {
            pf.total_pending = Some(p);
        }
    }

    Ok(pf)
}
