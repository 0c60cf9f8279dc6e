use academia::aggregator::{course_label, course_options, cycle_options};
use academia::models::EnrollmentRow;

fn row(v: serde_json::Value) -> EnrollmentRow {
    serde_json::from_value(v).expect("Debe construir la fila")
}

#[test]
fn test_ciclos_dedup_primera_posicion_ultimo_nombre() {
    let rows = vec![
        row(serde_json::json!({"student_id": 1, "enrollment_id": 1, "cycle_id": 1, "cycle_name": "Ciclo A"})),
        row(serde_json::json!({"student_id": 2, "enrollment_id": 2, "cycle_id": 2, "cycle_name": "Ciclo B"})),
        // reaparece el ciclo 1 con otro nombre: la posición se mantiene,
        // el nombre lo fija la última aparición
        row(serde_json::json!({"student_id": 3, "enrollment_id": 3, "cycle_id": 1, "cycle_name": "Ciclo A (renombrado)"})),
    ];

    let opciones = cycle_options(&rows);
    assert_eq!(opciones.len(), 2);
    assert_eq!(opciones[0].id, 1);
    assert_eq!(opciones[0].name, "Ciclo A (renombrado)");
    assert_eq!(opciones[1].id, 2);
    assert_eq!(opciones[1].name, "Ciclo B");
}

#[test]
fn test_ciclos_descarta_nulos_y_rotula_sin_nombre() {
    let rows = vec![
        row(serde_json::json!({"student_id": 1, "enrollment_id": 1, "cycle_id": null})),
        row(serde_json::json!({"student_id": 2, "enrollment_id": 2, "cycle_id": 5})),
    ];

    let opciones = cycle_options(&rows);
    assert_eq!(opciones.len(), 1);
    assert_eq!(opciones[0].id, 5);
    assert_eq!(opciones[0].name, "Ciclo 5");
}

#[test]
fn test_etiqueta_de_curso_con_grupo() {
    let con_grupo = row(serde_json::json!({
        "student_id": 1, "enrollment_id": 1,
        "enrolled_item": "Piano", "grupo": "A"
    }));
    assert_eq!(course_label(&con_grupo), "Piano - Grupo A");

    let sin_grupo = row(serde_json::json!({
        "student_id": 1, "enrollment_id": 2,
        "enrolled_item": "Canto"
    }));
    assert_eq!(course_label(&sin_grupo), "Canto");

    // grupo vacío equivale a sin grupo
    let grupo_vacio = row(serde_json::json!({
        "student_id": 1, "enrollment_id": 3,
        "enrolled_item": "Guitarra", "grupo": ""
    }));
    assert_eq!(course_label(&grupo_vacio), "Guitarra");
}

#[test]
fn test_cursos_solo_aceptados_y_dedup() {
    let rows = vec![
        row(serde_json::json!({"student_id": 1, "enrollment_id": 1, "enrollment_status": "aceptado", "enrolled_item": "Piano", "grupo": "A"})),
        row(serde_json::json!({"student_id": 2, "enrollment_id": 2, "enrollment_status": "aceptado", "enrolled_item": "Piano", "grupo": "A"})),
        row(serde_json::json!({"student_id": 3, "enrollment_id": 3, "enrollment_status": "pendiente", "enrolled_item": "Canto"})),
        row(serde_json::json!({"student_id": 4, "enrollment_id": 4, "enrollment_status": "aceptado", "enrolled_item": "Canto"})),
    ];

    let opciones = course_options(&rows);
    let nombres: Vec<&str> = opciones.iter().map(|o| o.name.as_str()).collect();
    // "Piano - Grupo A" una sola vez; "Canto" solo por la matrícula aceptada
    assert_eq!(nombres, vec!["Piano - Grupo A", "Canto"]);
}
