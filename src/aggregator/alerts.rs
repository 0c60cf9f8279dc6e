// Reglas de visualización de asistencia y alertas relativas a la fecha.
//
// La asistencia no significa nada antes de que el ciclo empiece: se
// suprime para no mostrar un 0% engañoso. Las alertas de deuda/pago sí
// siguen vigentes aunque el ciclo sea futuro.

use chrono::NaiveDate;

use crate::models::{AlertChip, ChipColor, EnrollmentRow, EnrollmentStatus};

/// Asistencia formateada para la tabla: `"-"` si el ciclo no tiene fecha
/// de inicio o aún no comienza; si no, porcentaje con un decimal.
pub fn attendance_display(row: &EnrollmentRow, today: NaiveDate) -> String {
    match row.start_date {
        Some(start) if start <= today => format!("{:.1}%", row.attendance_pct),
        _ => "-".to_string(),
    }
}

fn is_payment_alert(label: &str) -> bool {
    let lower = label.to_lowercase();
    lower.contains("deuda") || lower.contains("pago")
}

/// Chip de alerta de una fila, o `None` cuando se suprime (equivale al
/// "-" de la tabla). Etiqueta ausente => "En regla".
///
/// - Sin fecha de inicio: se muestra siempre.
/// - Ciclo futuro: solo alertas de pago/deuda; las de asistencia se ocultan.
/// - Ciclo iniciado: se muestra siempre.
pub fn alert_display(row: &EnrollmentRow, today: NaiveDate) -> Option<AlertChip> {
    let label = row
        .alert_status
        .clone()
        .unwrap_or_else(|| "En regla".to_string());

    if let Some(start) = row.start_date {
        if start > today && !is_payment_alert(&label) {
            return None;
        }
    }

    let color = alert_color(&label);
    Some(AlertChip { label, color })
}

/// Clasificación de la etiqueta por subcadena, en orden fijo de prioridad.
/// Cualquier etiqueta no reconocida (incluida "En regla") es `success`.
pub fn alert_color(label: &str) -> ChipColor {
    if label.contains("Deuda") {
        return ChipColor::Error;
    }
    if label.contains("Faltas") {
        return ChipColor::Warning;
    }
    if label.contains("Baja asistencia") {
        return ChipColor::Warning;
    }
    ChipColor::Success
}

pub fn status_color(status: EnrollmentStatus) -> ChipColor {
    match status {
        EnrollmentStatus::Aceptado => ChipColor::Success,
        EnrollmentStatus::Pendiente => ChipColor::Warning,
        EnrollmentStatus::Rechazado => ChipColor::Error,
    }
}
