// Construcción de las filas de las tres pestañas del dashboard
// (Resumen, Pagos, Asistencia) a partir del conjunto filtrado por ciclo.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::{AttendanceRow, EnrollmentRow, EnrollmentStatus, PaymentRow, SummaryRow};

use super::{alert_display, attendance_display, course_label, is_row_visible, status_color};

fn due_date_display(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => "-".to_string(),
    }
}

/// Pestaña Resumen: filas visibles (regla de paquete) con asistencia,
/// estado y alerta ya formateados.
pub fn summary_rows(
    rows: &[EnrollmentRow],
    coverage: &HashSet<(i64, Option<i64>)>,
    today: NaiveDate,
) -> Vec<SummaryRow> {
    rows.iter()
        .filter(|r| is_row_visible(r, coverage))
        .map(|r| SummaryRow {
            student_id: r.student_id,
            enrollment_id: r.enrollment_id,
            student_name: r.student_name.clone(),
            dni: r.dni.clone(),
            cycle_name: r.cycle_name.clone(),
            enrolled_item: r.enrolled_item.clone(),
            enrollment_status: r.enrollment_status,
            status_color: status_color(r.enrollment_status),
            attendance: attendance_display(r, today),
            total_paid: r.total_paid,
            total_pending: r.total_pending,
            alert: alert_display(r, today),
        })
        .collect()
}

/// Pestaña Pagos: misma visibilidad que Resumen. Mientras no exista pago
/// en partes, las cuotas pagadas solo pueden ser 0 (queda saldo) o 1.
pub fn payment_rows(
    rows: &[EnrollmentRow],
    coverage: &HashSet<(i64, Option<i64>)>,
) -> Vec<PaymentRow> {
    rows.iter()
        .filter(|r| is_row_visible(r, coverage))
        .map(|r| PaymentRow {
            student_id: r.student_id,
            enrollment_id: r.enrollment_id,
            student_name: r.student_name.clone(),
            cycle_name: r.cycle_name.clone(),
            enrolled_item: r.enrolled_item.clone(),
            total_paid: r.total_paid,
            total_pending: r.total_pending,
            paid_installments: if r.total_pending > 0.0 { 0 } else { 1 },
            pending_installments: r.pending_installments,
            next_due_date: due_date_display(r.next_due_date),
        })
        .collect()
}

/// Pestaña Asistencia: todas las matrículas aceptadas (curso o paquete),
/// con filtro opcional por etiqueta exacta de curso/grupo.
pub fn attendance_rows(
    rows: &[EnrollmentRow],
    curso: Option<&str>,
    today: NaiveDate,
) -> Vec<AttendanceRow> {
    rows.iter()
        .filter(|r| r.enrollment_status == EnrollmentStatus::Aceptado)
        .filter(|r| match curso {
            Some(c) => course_label(r) == c,
            None => true,
        })
        .map(|r| AttendanceRow {
            student_id: r.student_id,
            enrollment_id: r.enrollment_id,
            student_name: r.student_name.clone(),
            cycle_name: r.cycle_name.clone(),
            course_label: course_label(r),
            attendance: attendance_display(r, today),
            alert: alert_display(r, today),
        })
        .collect()
}
