//! PostgreSQL repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

use crate::domain::{Client, ClientId, ClientRepository, DatabaseError, Page, PageRequest};

const CLIENT_COLUMNS: &str = "id, name, tax_id, income, birth_date, dependents";

/// PostgreSQL connection pool configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(3),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// PostgreSQL-backed client repository with connection pooling
pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    /// Create a new repository with custom pool configuration
    pub async fn new(database_url: &str, config: PostgresConfig) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect(database_url)
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;
        info!(
            max_connections = config.max_connections,
            "PostgreSQL pool ready"
        );
        Ok(Self { pool })
    }

    /// Create a new repository with default pool configuration
    pub async fn with_defaults(database_url: &str) -> Result<Self, DatabaseError> {
        Self::new(database_url, PostgresConfig::default()).await
    }

    /// Get the underlying connection pool (for testing)
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Parse a database row into a Client
    fn row_to_client(row: &sqlx::postgres::PgRow) -> Result<Client, DatabaseError> {
        Ok(Client {
            id: Some(row.try_get("id")?),
            name: row.try_get("name")?,
            tax_id: row.try_get("tax_id")?,
            income: row.try_get("income")?,
            birth_date: row.try_get("birth_date")?,
            dependents: row.try_get("dependents")?,
        })
    }

    async fn count_clients(&self, income: Option<f64>) -> Result<u64, DatabaseError> {
        let total: i64 = match income {
            Some(income) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM clients WHERE income = $1")
                    .bind(income)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM clients")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(DatabaseError::from)?;

        Ok(total as u64)
    }
}

/// Builds the `ORDER BY` body for a page request.
///
/// Only ever interpolates the static column names behind `SortField`, so no
/// caller-supplied text reaches the SQL. Unsorted requests fall back to id
/// order to keep pages stable between calls.
fn order_clause(page: &PageRequest) -> String {
    match &page.sort {
        Some(sort) => format!("{} {}", sort.field.column(), sort.direction.as_sql()),
        None => "id ASC".to_string(),
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, DatabaseError> {
        let row = sqlx::query(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        match row {
            Some(row) => Ok(Some(Self::row_to_client(&row)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_all(&self, page: &PageRequest) -> Result<Page<Client>, DatabaseError> {
        let total = self.count_clients(None).await?;

        let sql = format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY {} OFFSET $1 LIMIT $2",
            order_clause(page)
        );
        let rows = sqlx::query(&sql)
            .bind(page.offset() as i64)
            .bind(i64::from(page.size))
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        let clients = rows
            .iter()
            .map(Self::row_to_client)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(clients, total, page))
    }

    #[instrument(skip(self))]
    async fn find_by_income(
        &self,
        income: f64,
        page: &PageRequest,
    ) -> Result<Page<Client>, DatabaseError> {
        let total = self.count_clients(Some(income)).await?;

        let sql = format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE income = $1 ORDER BY {} OFFSET $2 LIMIT $3",
            order_clause(page)
        );
        let rows = sqlx::query(&sql)
            .bind(income)
            .bind(page.offset() as i64)
            .bind(i64::from(page.size))
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        let clients = rows
            .iter()
            .map(Self::row_to_client)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(clients, total, page))
    }

    #[instrument(skip(self, client), fields(client_id = ?client.id))]
    async fn save(&self, client: &Client) -> Result<Client, DatabaseError> {
        match client.id {
            None => {
                let row = sqlx::query(&format!(
                    "INSERT INTO clients (name, tax_id, income, birth_date, dependents) \
                     VALUES ($1, $2, $3, $4, $5) RETURNING {CLIENT_COLUMNS}"
                ))
                .bind(&client.name)
                .bind(&client.tax_id)
                .bind(client.income)
                .bind(client.birth_date)
                .bind(client.dependents)
                .fetch_one(&self.pool)
                .await
                .map_err(DatabaseError::from)?;

                Self::row_to_client(&row)
            }
            Some(id) => {
                let row = sqlx::query(&format!(
                    "UPDATE clients SET name = $1, tax_id = $2, income = $3, \
                     birth_date = $4, dependents = $5 WHERE id = $6 RETURNING {CLIENT_COLUMNS}"
                ))
                .bind(&client.name)
                .bind(&client.tax_id)
                .bind(client.income)
                .bind(client.birth_date)
                .bind(client.dependents)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(DatabaseError::from)?;

                match row {
                    Some(row) => Self::row_to_client(&row),
                    None => Err(DatabaseError::EmptyResult(format!(
                        "client {} not found",
                        id
                    ))),
                }
            }
        }
    }

    #[instrument(skip(self))]
    async fn fetch_for_update(&self, id: ClientId) -> Result<Client, DatabaseError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::EmptyResult(format!("client {} not found", id)))
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: ClientId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::EmptyResult(format!(
                "client {} not found",
                id
            )));
        }

        Ok(())
    }
}
