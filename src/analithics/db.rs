use rusqlite::{params, Connection};
use std::env;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::PathBuf;

// Postgres client for remote DB support
use postgres::{Client, NoTls};

/// Abstracción sencilla para conexiones de analytics que puede ser SQLite o
/// Postgres. Para Postgres guardamos la URL y realizamos operaciones en un
/// hilo separado para no arrancar runtimes tokio dentro del runtime existente.
pub enum AnalyticsConn {
    Sqlite(Connection),
    /// Contiene la URL completa (postgres://...)
    PostgresConfig(String),
}

impl fmt::Debug for AnalyticsConn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsConn::Sqlite(_) => write!(f, "AnalyticsConn::Sqlite(..)"),
            AnalyticsConn::PostgresConfig(_) => write!(f, "AnalyticsConn::PostgresConfig(..)"),
        }
    }
}

// load .env at module init if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

/// Ruta del archivo de analytics. Expuesta para que otros submódulos abran
/// conexiones de corta vida. Honra ANALITHICS_DB_PATH / ANALITHICS_DB_URL.
pub fn analytics_db_path() -> PathBuf {
    load_dotenv();
    if let Ok(p) = env::var("ANALITHICS_DB_PATH") {
        PathBuf::from(p)
    } else if let Ok(p) = env::var("ANALITHICS_DB_URL") {
        if p.starts_with("sqlite://") {
            let without = p.trim_start_matches("sqlite://");
            PathBuf::from(without)
        } else if p.starts_with("file://") {
            let without = p.trim_start_matches("file://");
            PathBuf::from(without)
        } else {
            // URLs remotas (postgres://...) no producen un PathBuf local
            PathBuf::from("analithics/analytics.db")
        }
    } else {
        PathBuf::from("analithics/analytics.db")
    }
}

/// Inicializa la base de analytics (directorio + tablas `queries`/`reports`).
pub fn init_db() -> Result<(), Box<dyn Error>> {
    load_dotenv();
    // Si es sqlite local, asegurar que el directorio exista
    let is_local = match env::var("ANALITHICS_DB_URL") {
        Ok(url) => url.starts_with("sqlite://") || url.starts_with("file://"),
        Err(_) => true,
    };
    if is_local {
        let db_path = analytics_db_path();
        if let Some(dir) = db_path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
    }

    match open_analytics_connection() {
        Ok(AnalyticsConn::Sqlite(conn)) => {
            conn.execute(
                "CREATE TABLE IF NOT EXISTS queries (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    ts TEXT NOT NULL,
                    duration_ms INTEGER,
                    endpoint TEXT,
                    ciclo TEXT,
                    curso TEXT,
                    filas INTEGER,
                    total_paid REAL,
                    total_pending REAL,
                    request_json TEXT,
                    response_json TEXT,
                    client_ip TEXT
                )",
                [],
            )?;

            conn.execute(
                "CREATE TABLE IF NOT EXISTS reports (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    ts TEXT NOT NULL,
                    query_type TEXT NOT NULL,
                    params_json TEXT,
                    result_json TEXT
                )",
                [],
            )?;
            Ok(())
        }
        Ok(AnalyticsConn::PostgresConfig(url)) => {
            // Crear tablas en un hilo dedicado para evitar conflictos de runtime
            let url = url.clone();
            let handle = std::thread::spawn(move || -> Result<(), Box<dyn Error + Send + 'static>> {
                let mut client = Client::connect(&url, NoTls)
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                client
                    .batch_execute(
                        "CREATE TABLE IF NOT EXISTS queries (
                            id BIGSERIAL PRIMARY KEY,
                            ts TEXT NOT NULL,
                            duration_ms BIGINT,
                            endpoint TEXT,
                            ciclo TEXT,
                            curso TEXT,
                            filas BIGINT,
                            total_paid DOUBLE PRECISION,
                            total_pending DOUBLE PRECISION,
                            request_json TEXT,
                            response_json TEXT,
                            client_ip TEXT
                        );

                        CREATE TABLE IF NOT EXISTS reports (
                            id BIGSERIAL PRIMARY KEY,
                            ts TEXT NOT NULL,
                            query_type TEXT NOT NULL,
                            params_json TEXT,
                            result_json TEXT
                        );",
                    )
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                Ok(())
            });
            match handle.join() {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e as Box<dyn Error>),
                Err(e) => Err(format!("thread join error: {:?}", e).into()),
            }
        }
        Err(e) => Err(e),
    }
}

/// Abre una conexión a la base de analytics. Acepta sqlite://, file:// y
/// postgres:// en ANALITHICS_DB_URL; sin variable cae a sqlite local.
pub fn open_analytics_connection() -> Result<AnalyticsConn, Box<dyn Error>> {
    load_dotenv();
    if let Ok(url) = env::var("ANALITHICS_DB_URL") {
        if url.starts_with("sqlite://") {
            let path = url.trim_start_matches("sqlite://");
            let conn = Connection::open(path)?;
            return Ok(AnalyticsConn::Sqlite(conn));
        } else if url.starts_with("file://") {
            let path = url.trim_start_matches("file://");
            let conn = Connection::open(path)?;
            return Ok(AnalyticsConn::Sqlite(conn));
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            // Para Postgres solo guardamos la URL y diferimos el connect al
            // punto de uso (init_db / fetch_recent_queries).
            return Ok(AnalyticsConn::PostgresConfig(url));
        } else {
            return Err(format!("ANALITHICS_DB_URL uses unsupported scheme: {}", url).into());
        }
    }

    let path = analytics_db_path();
    let conn = Connection::open(path)?;
    Ok(AnalyticsConn::Sqlite(conn))
}

/// Fila resumida del log de consultas.
pub type QueryLogRow = (i64, String, Option<String>, Option<String>, Option<i64>, Option<i64>);

/// Últimas consultas registradas (id desc): id, ts, endpoint, ciclo, filas,
/// duration_ms.
pub fn fetch_recent_queries(conn: &AnalyticsConn, limit: i64) -> Result<Vec<QueryLogRow>, Box<dyn Error>> {
    match conn {
        AnalyticsConn::Sqlite(c) => {
            let mut stmt = c.prepare(
                "SELECT id, ts, endpoint, ciclo, filas, duration_ms FROM queries ORDER BY id DESC LIMIT ?1",
            )?;
            let rows_iter = stmt.query_map(params![limit], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })?;
            let mut out = Vec::new();
            for r in rows_iter {
                out.push(r?);
            }
            Ok(out)
        }
        AnalyticsConn::PostgresConfig(url) => {
            let url = url.clone();
            let handle = std::thread::spawn(move || -> Result<Vec<QueryLogRow>, Box<dyn Error + Send + 'static>> {
                let mut client = Client::connect(&url, NoTls)
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                let rows = client
                    .query(
                        "SELECT id, ts, endpoint, ciclo, filas, duration_ms FROM queries ORDER BY id DESC LIMIT $1",
                        &[&limit],
                    )
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                let mut out = Vec::new();
                for r in rows.iter() {
                    out.push((r.get(0), r.get(1), r.get(2), r.get(3), r.get(4), r.get(5)));
                }
                Ok(out)
            });
            match handle.join() {
                Ok(res) => res.map_err(|e| e as Box<dyn Error>),
                Err(e) => Err(format!("thread join error: {:?}", e).into()),
            }
        }
    }
}
