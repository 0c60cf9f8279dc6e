use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::{DashboardStats, EnrollmentRow, EnrollmentStatus};

use super::{compute_totals, package_coverage};

/// Umbral de asistencia baja (porcentaje).
pub const LOW_ATTENDANCE_THRESHOLD: f64 = 75.0;

/// Filas con asistencia baja en ciclos ya iniciados. Un ciclo sin fecha de
/// inicio o futuro no cuenta, tenga la asistencia que tenga.
pub fn low_attendance_count(rows: &[EnrollmentRow], today: NaiveDate) -> usize {
    rows.iter()
        .filter(|r| match r.start_date {
            Some(start) => start <= today && r.attendance_pct < LOW_ATTENDANCE_THRESHOLD,
            None => false,
        })
        .count()
}

/// Estadísticas derivadas del conjunto ya filtrado por ciclo. Entrada vacía
/// produce ceros, nunca un error.
pub fn compute_stats(rows: &[EnrollmentRow], today: NaiveDate) -> DashboardStats {
    let students: HashSet<i64> = rows.iter().map(|r| r.student_id).collect();
    let coverage = package_coverage(rows);
    let totals = compute_totals(rows, &coverage);

    DashboardStats {
        total_students: students.len(),
        total_enrollments: rows.len(),
        pending_enrollments: rows
            .iter()
            .filter(|r| r.enrollment_status == EnrollmentStatus::Pendiente)
            .count(),
        accepted_enrollments: rows
            .iter()
            .filter(|r| r.enrollment_status == EnrollmentStatus::Aceptado)
            .count(),
        total_paid: totals.total_paid,
        total_pending: totals.total_pending,
        low_attendance: low_attendance_count(rows, today),
    }
}
