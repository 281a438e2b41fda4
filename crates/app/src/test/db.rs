//! `PostgreSQL` test databases
//!
//! One container is started per test binary and every [`TestDb`] gets its own
//! freshly migrated database inside it. Tests using this module need a
//! container runtime and are marked `#[ignore]`.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers_modules::{
    postgres::Postgres as PostgresImage,
    testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner},
};
use tokio::sync::OnceCell;
use uuid::Uuid;

const USER: &str = "stockroom_test";
const PASSWORD: &str = "stockroom_test_password";

static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> =
    Lazy::new(OnceCell::new);

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name("stockroom_test")
        .with_tag("17-alpine")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

/// An isolated, migrated database.
#[derive(Debug, Clone)]
pub(crate) struct TestDb {
    pool: PgPool,
    name: String,
}

impl TestDb {
    pub async fn new() -> Self {
        let container = POSTGRES_CONTAINER
            .get_or_init(init_postgres_container)
            .await;

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get container port");

        let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE")
            .unwrap_or_else(|_| "localhost".to_string());

        let name = format!("stockroom_{}", Uuid::now_v7().simple());

        let mut conn =
            PgConnection::connect(&format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/postgres"))
                .await
                .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&format!(
            "postgresql://{USER}:{PASSWORD}@{host}:{port}/{name}"
        ))
        .await
        .expect("Failed to create pool for database");

        crate::database::migrate(&pool)
            .await
            .expect("Failed to run migrations on database");

        Self { pool, name }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn migrated_database_has_product_table() {
        let test_db = TestDb::new().await;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(test_db.pool())
            .await
            .expect("Failed to query products");

        assert_eq!(count, 0, "database {} should start empty", test_db.name());
    }
}
