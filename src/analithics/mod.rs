pub mod db;
pub mod queries;
pub mod insertions;
pub mod jsonparsing;

pub use db::init_db;
pub use insertions::{log_query, save_report};
pub use queries::{ciclos_mas_consultados, consultas_recientes, count_queries, promedio_montos};
