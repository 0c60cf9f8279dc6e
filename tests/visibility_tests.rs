use academia::aggregator::{filter_by_cycle, is_row_visible, package_coverage, visible_summary_rows};
use academia::api_json::CycleFilter;
use academia::models::EnrollmentRow;

fn row(student_id: i64, enrollment_id: i64, cycle_id: Option<i64>, tipo: &str) -> EnrollmentRow {
    serde_json::from_value(serde_json::json!({
        "student_id": student_id,
        "enrollment_id": enrollment_id,
        "cycle_id": cycle_id,
        "enrollment_type": tipo
    }))
    .expect("Debe construir la fila")
}

#[test]
fn test_paquetes_siempre_visibles() {
    let rows = vec![
        row(1, 10, Some(1), "package"),
        row(1, 12, Some(1), "package"),
    ];
    let coverage = package_coverage(&rows);
    for r in &rows {
        assert!(is_row_visible(r, &coverage));
    }
}

#[test]
fn test_curso_cubierto_se_oculta() {
    let rows = vec![
        row(1, 10, Some(1), "package"),
        row(1, 11, Some(1), "course"),
        row(2, 12, Some(1), "course"),
    ];
    let coverage = package_coverage(&rows);
    let visibles = visible_summary_rows(&rows, &coverage);
    let ids: Vec<i64> = visibles.iter().map(|r| r.enrollment_id).collect();
    // el curso del alumno 1 queda representado por su paquete
    assert_eq!(ids, vec![10, 12]);
}

#[test]
fn test_cobertura_distingue_ciclo_nulo() {
    // un paquete sin ciclo solo cubre cursos sin ciclo del mismo alumno
    let rows = vec![
        row(1, 10, None, "package"),
        row(1, 11, None, "course"),
        row(1, 12, Some(2), "course"),
    ];
    let coverage = package_coverage(&rows);
    let visibles = visible_summary_rows(&rows, &coverage);
    let ids: Vec<i64> = visibles.iter().map(|r| r.enrollment_id).collect();
    assert_eq!(ids, vec![10, 12]);
}

#[test]
fn test_filtro_por_ciclo() {
    let rows = vec![
        row(1, 10, Some(1), "course"),
        row(2, 11, Some(2), "course"),
        row(3, 12, None, "course"),
    ];

    let todas = filter_by_cycle(&rows, CycleFilter::All);
    assert_eq!(todas.len(), 3);

    let ciclo1 = filter_by_cycle(&rows, CycleFilter::Cycle(1));
    assert_eq!(ciclo1.len(), 1);
    assert_eq!(ciclo1[0].enrollment_id, 10);

    // las filas sin ciclo no coinciden con ningún id concreto
    let ciclo9 = filter_by_cycle(&rows, CycleFilter::Cycle(9));
    assert!(ciclo9.is_empty());
}

#[test]
fn test_filtro_preserva_orden_de_entrada() {
    let rows = vec![
        row(3, 30, Some(1), "course"),
        row(1, 10, Some(1), "course"),
        row(2, 20, Some(1), "course"),
    ];
    let ciclo1 = filter_by_cycle(&rows, CycleFilter::Cycle(1));
    let ids: Vec<i64> = ciclo1.iter().map(|r| r.enrollment_id).collect();
    assert_eq!(ids, vec![30, 10, 20]);
}

#[test]
fn test_cobertura_se_recalcula_sobre_el_conjunto_filtrado() {
    // al filtrar por ciclo 2 el paquete del ciclo 1 desaparece del set
    let rows = vec![
        row(1, 10, Some(1), "package"),
        row(1, 11, Some(2), "course"),
    ];
    let ciclo2 = filter_by_cycle(&rows, CycleFilter::Cycle(2));
    let coverage = package_coverage(&ciclo2);
    assert!(coverage.is_empty());
    assert!(is_row_visible(&ciclo2[0], &coverage));
}
