use academia::aggregator::{compute_totals, package_coverage, visible_summary_rows};
use academia::models::EnrollmentRow;

fn row(student_id: i64, enrollment_id: i64, cycle_id: i64, tipo: &str, paid: f64, pending: f64) -> EnrollmentRow {
    serde_json::from_value(serde_json::json!({
        "student_id": student_id,
        "enrollment_id": enrollment_id,
        "cycle_id": cycle_id,
        "enrollment_type": tipo,
        "total_paid": paid,
        "total_pending": pending
    }))
    .expect("Debe construir la fila")
}

#[test]
fn test_paquete_excluye_cursos_del_mismo_ciclo() {
    // alumno 1 con paquete (100) y curso (50) en el ciclo 1:
    // solo cuenta el paquete
    let rows = vec![
        row(1, 10, 1, "package", 100.0, 0.0),
        row(1, 11, 1, "course", 50.0, 20.0),
    ];
    let coverage = package_coverage(&rows);
    let totals = compute_totals(&rows, &coverage);
    assert_eq!(totals.total_paid, 100.0);
    assert_eq!(totals.total_pending, 0.0);
}

#[test]
fn test_curso_sin_paquete_suma() {
    let rows = vec![row(1, 10, 1, "course", 50.0, 30.0)];
    let coverage = package_coverage(&rows);
    let totals = compute_totals(&rows, &coverage);
    assert_eq!(totals.total_paid, 50.0);
    assert_eq!(totals.total_pending, 30.0);
}

#[test]
fn test_paquetes_duplicados_suman() {
    // acumulación cruda: dos filas de paquete del mismo alumno+ciclo suman ambas
    let rows = vec![
        row(1, 10, 1, "package", 100.0, 0.0),
        row(1, 12, 1, "package", 100.0, 50.0),
    ];
    let coverage = package_coverage(&rows);
    let totals = compute_totals(&rows, &coverage);
    assert_eq!(totals.total_paid, 200.0);
    assert_eq!(totals.total_pending, 50.0);
}

#[test]
fn test_paquete_no_cubre_otros_ciclos() {
    // el paquete del ciclo 1 no oculta el curso del ciclo 2 del mismo alumno
    let rows = vec![
        row(1, 10, 1, "package", 100.0, 0.0),
        row(1, 11, 2, "course", 80.0, 0.0),
    ];
    let coverage = package_coverage(&rows);
    let totals = compute_totals(&rows, &coverage);
    assert_eq!(totals.total_paid, 180.0);
}

#[test]
fn test_paquete_no_cubre_otros_alumnos() {
    let rows = vec![
        row(1, 10, 1, "package", 100.0, 0.0),
        row(2, 11, 1, "course", 60.0, 15.0),
    ];
    let coverage = package_coverage(&rows);
    let totals = compute_totals(&rows, &coverage);
    assert_eq!(totals.total_paid, 160.0);
    assert_eq!(totals.total_pending, 15.0);
}

#[test]
fn test_conjunto_vacio() {
    let rows: Vec<EnrollmentRow> = Vec::new();
    let coverage = package_coverage(&rows);
    let totals = compute_totals(&rows, &coverage);
    assert_eq!(totals.total_paid, 0.0);
    assert_eq!(totals.total_pending, 0.0);
    assert!(visible_summary_rows(&rows, &coverage).is_empty());
}

#[test]
fn test_consistencia_totales_con_filas_visibles() {
    // los totales deben coincidir con la suma de las filas visibles
    let rows = vec![
        row(1, 10, 1, "package", 100.0, 25.0),
        row(1, 11, 1, "course", 50.0, 10.0),
        row(2, 12, 1, "course", 70.0, 5.0),
        row(3, 13, 2, "package", 200.0, 0.0),
        row(3, 14, 2, "course", 90.0, 45.0),
        row(3, 15, 3, "course", 40.0, 40.0),
    ];
    let coverage = package_coverage(&rows);
    let totals = compute_totals(&rows, &coverage);

    let visibles = visible_summary_rows(&rows, &coverage);
    let paid: f64 = visibles.iter().map(|r| r.total_paid).sum();
    let pending: f64 = visibles.iter().map(|r| r.total_pending).sum();

    assert_eq!(totals.total_paid, paid);
    assert_eq!(totals.total_pending, pending);
    // paquete(100) + curso de otro alumno(70) + paquete(200) + curso ciclo sin paquete(40)
    assert_eq!(totals.total_paid, 410.0);
    assert_eq!(totals.total_pending, 110.0);
}
