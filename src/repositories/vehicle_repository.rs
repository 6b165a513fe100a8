use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{StoreError, StoreResult, VehicleStore};
use crate::models::{Coordinates, FuelType, NewVehicle, Vehicle, VehiclePatch};
use crate::query::{Predicate, Sort};

const SELECT_VEHICLE: &str = r#"
    SELECT v.id, v.name, c.x, c.y, v.creation_date, v.engine_power,
           v.number_of_wheels, v.capacity, v.fuel_type
    FROM vehicle v
    JOIN coordinates c ON c.vehicle_id = v.id
"#;

const COUNT_VEHICLE: &str = r#"
    SELECT COUNT(*)
    FROM vehicle v
    JOIN coordinates c ON c.vehicle_id = v.id
"#;

// Fila plana de vehicle + coordinates
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: i32,
    name: String,
    x: i64,
    y: i32,
    creation_date: DateTime<Utc>,
    engine_power: Option<i64>,
    number_of_wheels: Option<i64>,
    capacity: f64,
    fuel_type: String,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = StoreError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let fuel_type = row.fuel_type.parse::<FuelType>().map_err(|e| {
            StoreError::Corrupt(format!("vehicle {} has {}", row.id, e))
        })?;

        Ok(Vehicle {
            id: row.id,
            name: row.name,
            coordinates: Coordinates { x: row.x, y: row.y },
            creation_date: row.creation_date,
            engine_power: row.engine_power,
            number_of_wheels: row.number_of_wheels,
            capacity: row.capacity,
            fuel_type,
        })
    }
}

#[derive(Clone)]
pub struct PgVehicleStore {
    pool: PgPool,
}

impl PgVehicleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PgVehicleStore {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!("{SELECT_VEHICLE} WHERE v.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn insert(&self, vehicle: NewVehicle) -> StoreResult<Vehicle> {
        let mut tx = self.pool.begin().await?;

        let (id, creation_date): (i32, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO vehicle (name, creation_date, engine_power, number_of_wheels, capacity, fuel_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, creation_date
            "#,
        )
        .bind(&vehicle.name)
        .bind(Utc::now())
        .bind(vehicle.engine_power)
        .bind(vehicle.number_of_wheels)
        .bind(vehicle.capacity)
        .bind(vehicle.fuel_type.as_str())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO coordinates (vehicle_id, x, y) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(vehicle.coordinates.x)
            .bind(vehicle.coordinates.y)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        log::info!("🚗 Vehicle {} created", id);
        Ok(vehicle.into_vehicle(id, creation_date))
    }

    async fn update(&self, id: i32, patch: &VehiclePatch) -> StoreResult<Option<Vehicle>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "{SELECT_VEHICLE} WHERE v.id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut vehicle = Vehicle::try_from(row)?;
        patch.apply_to(&mut vehicle);

        sqlx::query(
            r#"
            UPDATE vehicle
            SET name = $2, engine_power = $3, number_of_wheels = $4, capacity = $5, fuel_type = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&vehicle.name)
        .bind(vehicle.engine_power)
        .bind(vehicle.number_of_wheels)
        .bind(vehicle.capacity)
        .bind(vehicle.fuel_type.as_str())
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE coordinates SET x = $2, y = $3 WHERE vehicle_id = $1")
            .bind(id)
            .bind(vehicle.coordinates.x)
            .bind(vehicle.coordinates.y)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(vehicle))
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        // coordinates se borra en cascada
        let result = sqlx::query("DELETE FROM vehicle WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, predicate: &Predicate) -> StoreResult<i64> {
        let mut builder = QueryBuilder::<Postgres>::new(COUNT_VEHICLE);
        builder.push(" WHERE ");
        predicate.push_sql(&mut builder);

        let (total,) = builder
            .build_query_as::<(i64,)>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn query(
        &self,
        predicate: &Predicate,
        sort: &Sort,
        offset: i64,
        limit: Option<i64>,
    ) -> StoreResult<Vec<Vehicle>> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_VEHICLE);
        builder.push(" WHERE ");
        predicate.push_sql(&mut builder);
        builder.push(" ORDER BY ").push(sort.sql());
        builder.push(" OFFSET ").push_bind(offset);
        if let Some(limit) = limit {
            builder.push(" LIMIT ").push_bind(limit);
        }

        let rows = builder
            .build_query_as::<VehicleRow>()
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn average_engine_power(&self) -> StoreResult<Option<f64>> {
        let (average,): (Option<f64>,) =
            sqlx::query_as("SELECT AVG(engine_power)::DOUBLE PRECISION FROM vehicle")
                .fetch_one(&self.pool)
                .await?;

        Ok(average)
    }
}
