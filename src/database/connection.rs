//! Conexión a PostgreSQL
//!
//! Abre el pool y crea el esquema (`vehicle` + `coordinates`) si no existe.

use sqlx::PgPool;

use crate::config::DatabaseConfig;

const CREATE_VEHICLE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS vehicle (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL CHECK (name <> ''),
        creation_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        engine_power BIGINT CHECK (engine_power > 0),
        number_of_wheels BIGINT CHECK (number_of_wheels > 0),
        capacity DOUBLE PRECISION NOT NULL CHECK (capacity > 0),
        fuel_type VARCHAR(31) NOT NULL
    )
"#;

const CREATE_COORDINATES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS coordinates (
        vehicle_id INTEGER PRIMARY KEY REFERENCES vehicle(id) ON DELETE CASCADE,
        x BIGINT NOT NULL,
        y INTEGER NOT NULL
    )
"#;

/// Pool de PostgreSQL con el esquema inicializado
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Conectar y crear las tablas que falten
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        log::info!("🗄️ Connecting to {}", mask_database_url(&config.url));
        let pool = config.create_pool().await?;

        let connection = Self { pool };
        connection.initialize_schema().await?;
        Ok(connection)
    }

    pub async fn initialize_schema(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(CREATE_VEHICLE_TABLE).execute(&mut *tx).await?;
        sqlx::query(CREATE_COORDINATES_TABLE).execute(&mut *tx).await?;
        tx.commit().await?;

        log::info!("✅ Database schema ready");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn into_pool(self) -> PgPool {
        self.pool
    }
}

/// Enmascarar credenciales de la URL para los logs
pub fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.find('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|pos| pos + 3).unwrap_or(0);
    if scheme_end > at_pos {
        return url.to_string();
    }
    format!("{}***:***@{}", &url[..scheme_end], &url[at_pos + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_database_url() {
        assert_eq!(
            mask_database_url("postgres://user:secret@db:5432/vehicles"),
            "postgres://***:***@db:5432/vehicles"
        );
        assert_eq!(
            mask_database_url("postgres://localhost/vehicles"),
            "postgres://localhost/vehicles"
        );
    }
}
