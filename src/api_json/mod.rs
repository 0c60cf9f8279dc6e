use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::EnrollmentRow;

/// Filtro de ciclo del dashboard: `"all"` o el id de un ciclo concreto.
/// Acepta en el JSON el literal `"all"`, un número, un string numérico o
/// null (equivalente a `"all"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleFilter {
    All,
    Cycle(i64),
}

impl CycleFilter {
    pub fn from_value(v: &Value) -> CycleFilter {
        match v {
            Value::Number(n) => n.as_i64().map(CycleFilter::Cycle).unwrap_or(CycleFilter::All),
            Value::String(s) => {
                let t = s.trim();
                if t.is_empty() || t.eq_ignore_ascii_case("all") {
                    CycleFilter::All
                } else {
                    t.parse::<i64>().map(CycleFilter::Cycle).unwrap_or(CycleFilter::All)
                }
            }
            _ => CycleFilter::All,
        }
    }
}

impl Default for CycleFilter {
    fn default() -> Self {
        CycleFilter::All
    }
}

impl Serialize for CycleFilter {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            CycleFilter::All => s.serialize_str("all"),
            CycleFilter::Cycle(id) => s.serialize_i64(*id),
        }
    }
}

impl<'de> Deserialize<'de> for CycleFilter {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = Value::deserialize(d)?;
        Ok(CycleFilter::from_value(&v))
    }
}

/// Consulta del dashboard administrativo.
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "rows": [
///     {
///       "student_id": 7,
///       "enrollment_id": 31,
///       "cycle_id": 2,
///       "cycle_name": "Ciclo Verano 2026",
///       "student_name": "María Quispe",
///       "dni": "74381920",
///       "enrollment_type": "package",
///       "enrolled_item": "Paquete Intensivo",
///       "grupo": "A",
///       "enrollment_status": "aceptado",
///       "start_date": "2026-01-05",
///       "attendance_pct": 88.5,
///       "total_paid": "350.00",
///       "total_pending": 0,
///       "pending_installments": 0,
///       "next_due_date": null,
///       "alert_status": null
///     }
///   ],
///   "ciclo": "all",
///   "curso": null,
///   "today": "2026-08-06"
/// }
/// ```
///
/// # Campos:
/// - `rows`: arreglo de filas tal como lo entrega `GET /api/admin/dashboard`
/// - `ciclo`: `"all"` o un id de ciclo (filtra antes de agregar)
/// - `curso`: etiqueta exacta de curso/grupo para la pestaña de asistencia
/// - `today`: fecha de referencia opcional; si falta se usa la fecha actual.
///   Permite respuestas deterministas en pruebas y reprocesos.
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardQuery {
    #[serde(default, alias = "dashboard")]
    pub rows: Vec<EnrollmentRow>,
    #[serde(default, alias = "cycle_id")]
    pub ciclo: CycleFilter,
    #[serde(default, alias = "course")]
    pub curso: Option<String>,
    #[serde(default, deserialize_with = "de_today")]
    pub today: Option<NaiveDate>,
}

fn de_today<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(v.as_str().and_then(crate::models::parse_fecha))
}

pub fn parse_json_input(json_str: &str) -> Result<DashboardQuery, serde_json::Error> {
    serde_json::from_str::<DashboardQuery>(json_str)
}

/// Fecha de referencia efectiva de la consulta: la que trae el request o,
/// en su defecto, la fecha actual UTC.
pub fn effective_today(query: &DashboardQuery) -> NaiveDate {
    query.today.unwrap_or_else(|| Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnrollmentStatus, EnrollmentType};

    #[test]
    fn test_parse_json_completo() {
        let json_data = r#"
        {
            "rows": [
                {
                    "student_id": 7,
                    "enrollment_id": 31,
                    "cycle_id": 2,
                    "cycle_name": "Ciclo Verano 2026",
                    "student_name": "María Quispe",
                    "dni": "74381920",
                    "enrollment_type": "package",
                    "enrolled_item": "Paquete Intensivo",
                    "grupo": "A",
                    "enrollment_status": "aceptado",
                    "start_date": "2026-01-05",
                    "attendance_pct": 88.5,
                    "total_paid": "350.00",
                    "total_pending": 0,
                    "pending_installments": 0,
                    "next_due_date": null,
                    "alert_status": null
                }
            ],
            "ciclo": 2,
            "today": "2026-08-06"
        }
        "#;

        let query = parse_json_input(json_data).expect("Debe parsear la consulta completa");
        assert_eq!(query.rows.len(), 1);
        assert_eq!(query.ciclo, CycleFilter::Cycle(2));
        assert_eq!(query.today, NaiveDate::from_ymd_opt(2026, 8, 6));

        let row = &query.rows[0];
        assert_eq!(row.enrollment_type, EnrollmentType::Package);
        assert_eq!(row.enrollment_status, EnrollmentStatus::Aceptado);
        // monto entregado como string numérico
        assert_eq!(row.total_paid, 350.0);
        assert_eq!(row.start_date, NaiveDate::from_ymd_opt(2026, 1, 5));
    }

    #[test]
    fn test_parse_json_minimo() {
        // Solo las filas; ciclo/curso/today ausentes
        let json_data = r#"
        {
            "rows": [
                { "student_id": 1, "enrollment_id": 10 }
            ]
        }
        "#;

        let query = parse_json_input(json_data).expect("Debe parsear la consulta mínima");
        assert_eq!(query.ciclo, CycleFilter::All);
        assert!(query.curso.is_none());
        assert!(query.today.is_none());

        // campos ausentes degradan a defaults seguros
        let row = &query.rows[0];
        assert_eq!(row.enrollment_type, EnrollmentType::Course);
        assert_eq!(row.enrollment_status, EnrollmentStatus::Pendiente);
        assert_eq!(row.total_paid, 0.0);
        assert_eq!(row.total_pending, 0.0);
        assert_eq!(row.attendance_pct, 0.0);
        assert!(row.start_date.is_none());
    }

    #[test]
    fn test_cycle_filter_formas() {
        assert_eq!(CycleFilter::from_value(&serde_json::json!("all")), CycleFilter::All);
        assert_eq!(CycleFilter::from_value(&serde_json::json!(null)), CycleFilter::All);
        assert_eq!(CycleFilter::from_value(&serde_json::json!(12)), CycleFilter::Cycle(12));
        assert_eq!(CycleFilter::from_value(&serde_json::json!("12")), CycleFilter::Cycle(12));
        assert_eq!(CycleFilter::from_value(&serde_json::json!("")), CycleFilter::All);
    }

    #[test]
    fn test_montos_sucios() {
        // valores no numéricos o nulos se coaccionan a 0, nunca a NaN
        let json_data = r#"
        {
            "rows": [
                {
                    "student_id": 3,
                    "enrollment_id": 9,
                    "total_paid": "no-aplica",
                    "total_pending": null,
                    "attendance_pct": "72.5",
                    "pending_installments": "2",
                    "dni": 74381920
                }
            ]
        }
        "#;

        let query = parse_json_input(json_data).expect("Debe tolerar montos sucios");
        let row = &query.rows[0];
        assert_eq!(row.total_paid, 0.0);
        assert_eq!(row.total_pending, 0.0);
        assert_eq!(row.attendance_pct, 72.5);
        assert_eq!(row.pending_installments, 2);
        assert_eq!(row.dni.as_deref(), Some("74381920"));
    }

    #[test]
    fn test_fechas_con_timestamp() {
        let json_data = r#"
        {
            "rows": [
                {
                    "student_id": 4,
                    "enrollment_id": 11,
                    "start_date": "2026-03-15T00:00:00.000Z",
                    "next_due_date": "fecha-invalida"
                }
            ]
        }
        "#;

        let query = parse_json_input(json_data).expect("Debe parsear fechas con timestamp");
        let row = &query.rows[0];
        assert_eq!(row.start_date, NaiveDate::from_ymd_opt(2026, 3, 15));
        assert!(row.next_due_date.is_none());
    }
}
