use std::collections::HashSet;

use serde::Serialize;

use crate::models::{EnrollmentRow, EnrollmentType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub total_paid: f64,
    pub total_pending: f64,
}

/// Totales pagado/pendiente con la regla de exclusividad de paquete:
/// - una fila de paquete siempre suma (si el backend entregara duplicados,
///   todos suman: acumulación cruda, sin deduplicar);
/// - una fila de curso se omite cuando su (alumno, ciclo) está cubierto
///   por un paquete, para no cobrar dos veces el mismo ciclo.
/// Los montos ya llegan coaccionados a 0 desde la deserialización, así que
/// la suma nunca produce NaN.
pub fn compute_totals(
    rows: &[EnrollmentRow],
    coverage: &HashSet<(i64, Option<i64>)>,
) -> Totals {
    let mut acc = Totals::default();
    for row in rows {
        if row.enrollment_type != EnrollmentType::Package
            && coverage.contains(&(row.student_id, row.cycle_id))
        {
            // curso incluido en el paquete del mismo alumno+ciclo
            continue;
        }
        acc.total_paid += row.total_paid;
        acc.total_pending += row.total_pending;
    }
    acc
}
