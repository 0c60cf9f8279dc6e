// Persistencia del snapshot del dashboard en `data/dashboard.json`.
// Solo este módulo toca el directorio de datos; los handlers GET computan
// sobre el último snapshot guardado por POST /dashboard/snapshot.

use std::error::Error;
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::models::EnrollmentRow;

/// Directorio de datos. Honra la variable DASHBOARD_DATA_DIR.
pub fn data_dir() -> PathBuf {
    let _ = dotenv::dotenv();
    match std::env::var("DASHBOARD_DATA_DIR") {
        Ok(d) => PathBuf::from(d),
        Err(_) => PathBuf::from("data"),
    }
}

pub fn snapshot_path() -> PathBuf {
    data_dir().join("dashboard.json")
}

/// Guarda el arreglo de filas sustituyendo el snapshot anterior.
/// Devuelve cuántas filas quedaron guardadas.
pub fn save_snapshot(rows: &[EnrollmentRow]) -> Result<usize, Box<dyn Error>> {
    let dir = data_dir();
    create_dir_all(&dir)?;

    let file_path = snapshot_path();
    let text = serde_json::to_string_pretty(rows)?;
    let mut f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&file_path)?;
    f.write_all(text.as_bytes())?;
    Ok(rows.len())
}

/// Lee el snapshot si existe. Un archivo vacío o corrupto se trata como
/// inexistente (se informa por log y se empieza de cero).
pub fn load_snapshot() -> Result<Option<Vec<EnrollmentRow>>, Box<dyn Error>> {
    let file_path = snapshot_path();
    if !file_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&file_path)?;
    if contents.trim().is_empty() {
        return Ok(None);
    }

    match serde_json::from_str::<Vec<EnrollmentRow>>(&contents) {
        Ok(rows) => Ok(Some(rows)),
        Err(e) => {
            log::warn!("snapshot inválido en {}: {}", file_path.display(), e);
            Ok(None)
        }
    }
}
