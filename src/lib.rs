// Biblioteca raíz del crate `academia`.
// Reexporta los módulos principales: modelos, parsing de entrada,
// el agregador del dashboard y el servidor HTTP.
pub mod models;
pub mod api_json;
pub mod aggregator;
pub mod snapshot;
pub mod server;
pub mod server_handlers;
pub mod analithics;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
