// Estructuras de datos principales del dashboard administrativo

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tipo de matrícula: curso individual o paquete de cursos.
/// Un valor desconocido en el JSON se degrada a `Course` en vez de fallar
/// la deserialización del arreglo completo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentType {
    Course,
    Package,
}

impl EnrollmentType {
    pub fn from_wire(s: &str) -> EnrollmentType {
        match s {
            "package" => EnrollmentType::Package,
            _ => EnrollmentType::Course,
        }
    }
}

impl Default for EnrollmentType {
    fn default() -> Self {
        EnrollmentType::Course
    }
}

/// Estado de una matrícula según el backend (literales en español).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Pendiente,
    Aceptado,
    Rechazado,
}

impl EnrollmentStatus {
    pub fn from_wire(s: &str) -> EnrollmentStatus {
        match s {
            "aceptado" => EnrollmentStatus::Aceptado,
            "rechazado" => EnrollmentStatus::Rechazado,
            _ => EnrollmentStatus::Pendiente,
        }
    }
}

impl Default for EnrollmentStatus {
    fn default() -> Self {
        EnrollmentStatus::Pendiente
    }
}

/// Color de chip usado por el frontend (paleta MUI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipColor {
    Success,
    Warning,
    Error,
    Default,
}

/// Una fila del dashboard: un estudiante x un item matriculado (curso o
/// paquete) dentro de un ciclo. Clave única: (student_id, enrollment_id).
/// Los montos y porcentajes llegan como número, string numérico o null;
/// cualquier valor no numérico se coacciona a 0 al deserializar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentRow {
    pub student_id: i64,
    pub enrollment_id: i64,
    #[serde(default)]
    pub cycle_id: Option<i64>,
    #[serde(default)]
    pub cycle_name: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_texto")]
    pub dni: Option<String>,
    #[serde(default, deserialize_with = "de_enrollment_type")]
    pub enrollment_type: EnrollmentType,
    #[serde(default)]
    pub enrolled_item: Option<String>,
    #[serde(default, deserialize_with = "de_opt_texto")]
    pub grupo: Option<String>,
    #[serde(default, deserialize_with = "de_enrollment_status")]
    pub enrollment_status: EnrollmentStatus,
    #[serde(default, deserialize_with = "de_fecha")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_monto")]
    pub attendance_pct: f64,
    #[serde(default, deserialize_with = "de_monto")]
    pub total_paid: f64,
    #[serde(default, deserialize_with = "de_monto")]
    pub total_pending: f64,
    #[serde(default, deserialize_with = "de_cuotas")]
    pub pending_installments: i64,
    #[serde(default, deserialize_with = "de_fecha")]
    pub next_due_date: Option<NaiveDate>,
    #[serde(default)]
    pub alert_status: Option<String>,
}

/// Etiqueta de alerta ya clasificada, lista para renderizar como chip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertChip {
    pub label: String,
    pub color: ChipColor,
}

/// Opción del selector de ciclos.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleOption {
    pub id: i64,
    pub name: String,
}

/// Opción del selector de cursos (curso, o "curso - Grupo X").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseOption {
    pub name: String,
}

/// Estadísticas derivadas del conjunto de filas ya filtrado por ciclo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_students: usize,
    pub total_enrollments: usize,
    pub pending_enrollments: usize,
    pub accepted_enrollments: usize,
    pub total_paid: f64,
    pub total_pending: f64,
    pub low_attendance: usize,
}

/// Fila de la pestaña Resumen.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub student_id: i64,
    pub enrollment_id: i64,
    pub student_name: Option<String>,
    pub dni: Option<String>,
    pub cycle_name: Option<String>,
    pub enrolled_item: Option<String>,
    pub enrollment_status: EnrollmentStatus,
    pub status_color: ChipColor,
    pub attendance: String,
    pub total_paid: f64,
    pub total_pending: f64,
    pub alert: Option<AlertChip>,
}

/// Fila de la pestaña Pagos.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRow {
    pub student_id: i64,
    pub enrollment_id: i64,
    pub student_name: Option<String>,
    pub cycle_name: Option<String>,
    pub enrolled_item: Option<String>,
    pub total_paid: f64,
    pub total_pending: f64,
    pub paid_installments: i64,
    pub pending_installments: i64,
    pub next_due_date: String,
}

/// Fila de la pestaña Asistencia.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRow {
    pub student_id: i64,
    pub enrollment_id: i64,
    pub student_name: Option<String>,
    pub cycle_name: Option<String>,
    pub course_label: String,
    pub attendance: String,
    pub alert: Option<AlertChip>,
}

// --- Coerciones tolerantes para campos que el backend entrega "sucios" ---

/// Monto o porcentaje: número, string numérico o null -> f64 (0 si no aplica).
/// Nunca propaga NaN/inf a las sumas.
pub(crate) fn coerce_monto(v: &Value) -> f64 {
    let f = match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if f.is_finite() { f } else { 0.0 }
}

/// Fecha en formato `YYYY-MM-DD` o timestamp ISO completo; se toma el prefijo
/// de fecha. Valores no parseables degradan a None.
pub(crate) fn parse_fecha(s: &str) -> Option<NaiveDate> {
    let prefix = s.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

fn de_monto<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(coerce_monto(&v))
}

fn de_cuotas<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    let n = match &v {
        Value::Number(n) => n.as_i64().unwrap_or_else(|| coerce_monto(&v) as i64),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    Ok(n)
}

fn de_fecha<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(v.as_str().and_then(parse_fecha))
}

/// DNI y grupo pueden llegar como string o como número.
fn de_opt_texto<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn de_enrollment_type<'de, D>(d: D) -> Result<EnrollmentType, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(EnrollmentType::from_wire(v.as_str().unwrap_or("")))
}

fn de_enrollment_status<'de, D>(d: D) -> Result<EnrollmentStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(EnrollmentStatus::from_wire(v.as_str().unwrap_or("")))
}
