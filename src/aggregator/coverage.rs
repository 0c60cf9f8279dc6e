// Filtro por ciclo y cobertura de paquetes.
//
// Regla de negocio: si un alumno tiene un paquete en un ciclo, sus cursos
// individuales de ese mismo ciclo se consideran incluidos en el paquete
// (no se muestran ni se suman aparte).

use std::collections::HashSet;

use crate::api_json::CycleFilter;
use crate::models::{EnrollmentRow, EnrollmentType};

/// Filas del ciclo seleccionado, en el orden de entrada. `All` es identidad.
pub fn filter_by_cycle(rows: &[EnrollmentRow], ciclo: CycleFilter) -> Vec<EnrollmentRow> {
    match ciclo {
        CycleFilter::All => rows.to_vec(),
        CycleFilter::Cycle(id) => rows
            .iter()
            .filter(|r| r.cycle_id == Some(id))
            .cloned()
            .collect(),
    }
}

/// Pares (student_id, cycle_id) para los que existe al menos una matrícula
/// de paquete en el conjunto recibido. Se recalcula en cada cambio del
/// conjunto filtrado; las filas de curso nunca aportan al set.
pub fn package_coverage(rows: &[EnrollmentRow]) -> HashSet<(i64, Option<i64>)> {
    rows.iter()
        .filter(|r| r.enrollment_type == EnrollmentType::Package)
        .map(|r| (r.student_id, r.cycle_id))
        .collect()
}

/// Visibilidad en las pestañas Resumen/Pagos: los paquetes siempre se
/// muestran; un curso se oculta si su alumno+ciclo ya tiene paquete.
pub fn is_row_visible(row: &EnrollmentRow, coverage: &HashSet<(i64, Option<i64>)>) -> bool {
    if row.enrollment_type == EnrollmentType::Package {
        return true;
    }
    !coverage.contains(&(row.student_id, row.cycle_id))
}

pub fn visible_summary_rows(
    rows: &[EnrollmentRow],
    coverage: &HashSet<(i64, Option<i64>)>,
) -> Vec<EnrollmentRow> {
    rows.iter()
        .filter(|r| is_row_visible(r, coverage))
        .cloned()
        .collect()
}
