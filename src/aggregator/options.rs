// Derivación de las opciones de los selectores (ciclo y curso) a partir
// de las filas, sin catálogo aparte: el propio dashboard es la fuente.

use std::collections::{HashMap, HashSet};

use crate::models::{CourseOption, CycleOption, EnrollmentRow, EnrollmentStatus};

/// Opciones del selector de ciclos, deduplicadas por id. La primera
/// aparición fija la posición y la última fija el nombre (semántica de
/// `Map` sobre el arreglo completo); filas sin ciclo se descartan.
/// Un ciclo sin nombre se rotula "Ciclo {id}".
pub fn cycle_options(rows: &[EnrollmentRow]) -> Vec<CycleOption> {
    let mut order: Vec<i64> = Vec::new();
    let mut names: HashMap<i64, Option<String>> = HashMap::new();

    for row in rows {
        let Some(id) = row.cycle_id else { continue };
        if !names.contains_key(&id) {
            order.push(id);
        }
        names.insert(id, row.cycle_name.clone());
    }

    order
        .into_iter()
        .map(|id| {
            let name = names
                .remove(&id)
                .flatten()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("Ciclo {}", id));
            CycleOption { id, name }
        })
        .collect()
}

/// Etiqueta de curso para filtros y la pestaña de asistencia:
/// `"{curso} - Grupo {grupo}"` cuando hay grupo, el nombre del curso si no.
pub fn course_label(row: &EnrollmentRow) -> String {
    let item = row.enrolled_item.clone().unwrap_or_default();
    match &row.grupo {
        Some(g) if !g.is_empty() => format!("{} - Grupo {}", item, g),
        _ => item,
    }
}

/// Opciones del selector de cursos: solo matrículas aceptadas, etiquetas
/// deduplicadas preservando el orden de primera aparición.
pub fn course_options(rows: &[EnrollmentRow]) -> Vec<CourseOption> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<CourseOption> = Vec::new();

    for row in rows
        .iter()
        .filter(|r| r.enrollment_status == EnrollmentStatus::Aceptado)
    {
        let label = course_label(row);
        if seen.insert(label.clone()) {
            out.push(CourseOption { name: label });
        }
    }
    out
}
