// Módulo de alto nivel del agregador del dashboard administrativo.
// Funciones puras sobre el snapshot de filas ya resuelto: el agregador
// nunca hace I/O; la vista (o el handler HTTP) le pasa el estado actual
// y recibe el modelo derivado.
pub mod coverage;
pub mod totals;
pub mod alerts;
pub mod stats;
pub mod options;
pub mod views;

// Reexportar la API pública del agregador
pub use coverage::{filter_by_cycle, is_row_visible, package_coverage, visible_summary_rows};
pub use totals::{compute_totals, Totals};
pub use alerts::{alert_color, alert_display, attendance_display, status_color};
pub use stats::{compute_stats, low_attendance_count, LOW_ATTENDANCE_THRESHOLD};
pub use options::{course_label, course_options, cycle_options};
pub use views::{attendance_rows, payment_rows, summary_rows};
