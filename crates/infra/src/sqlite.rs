//! SQLite-backed implementation of the `PartStore` port.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use atelier_core::{Money, PartId};
use atelier_inventory::{Category, Color, NewPart, Part, PartStore, StoreError, StoreResult};

/// Single-file relational store for the parts table.
///
/// Every write commits immediately; only `deduct_all` spans a transaction.
#[derive(Debug, Clone)]
pub struct SqlitePartStore {
    pool: SqlitePool,
}

impl SqlitePartStore {
    /// Open (creating if missing) the database at `path` and bootstrap the
    /// schema.
    pub async fn open(path: &Path) -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(to_store_error)?;
        Self::bootstrap(pool).await
    }

    /// In-memory database, used by tests.
    ///
    /// A single connection keeps every caller on the same `:memory:`
    /// database; more connections would each see their own empty one.
    pub async fn in_memory() -> StoreResult<Self> {
        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(to_store_error)?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(to_store_error)?;
        Self::bootstrap(pool).await
    }

    async fn bootstrap(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS parts (
                id          INTEGER PRIMARY KEY,
                part_number TEXT NOT NULL,
                name        TEXT NOT NULL,
                category    TEXT NOT NULL,
                color       TEXT NOT NULL,
                qty         INTEGER NOT NULL,
                cost        INTEGER NOT NULL,
                price       INTEGER NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(to_store_error)?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl PartStore for SqlitePartStore {
    async fn create(&self, part: NewPart) -> StoreResult<Part> {
        let result = sqlx::query(
            r#"
            INSERT INTO parts (part_number, name, category, color, qty, cost, price)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&part.part_number)
        .bind(&part.name)
        .bind(part.category.label())
        .bind(part.color.label())
        .bind(part.qty)
        .bind(part.cost.cents() as i64)
        .bind(part.price.cents() as i64)
        .execute(&self.pool)
        .await
        .map_err(to_store_error)?;

        let id = PartId::from_raw(result.last_insert_rowid());
        tracing::debug!(%id, part_number = %part.part_number, "part created");

        Ok(Part {
            id,
            part_number: part.part_number,
            name: part.name,
            category: part.category,
            color: part.color,
            qty: part.qty,
            cost: part.cost,
            price: part.price,
        })
    }

    async fn list(&self) -> StoreResult<Vec<Part>> {
        let rows = sqlx::query(
            r#"
            SELECT id, part_number, name, category, color, qty, cost, price
            FROM parts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(to_store_error)?;

        rows.iter().map(row_to_part).collect()
    }

    async fn get(&self, id: PartId) -> StoreResult<Option<Part>> {
        let row = sqlx::query(
            r#"
            SELECT id, part_number, name, category, color, qty, cost, price
            FROM parts
            WHERE id = ?1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(to_store_error)?;

        row.as_ref().map(row_to_part).transpose()
    }

    async fn update_levels(
        &self,
        id: PartId,
        qty: i64,
        cost: Money,
        price: Money,
    ) -> StoreResult<()> {
        // Zero rows affected (unknown id) is silently accepted.
        sqlx::query(
            r#"
            UPDATE parts SET qty = ?1, cost = ?2, price = ?3 WHERE id = ?4
            "#,
        )
        .bind(qty)
        .bind(cost.cents() as i64)
        .bind(price.cents() as i64)
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(to_store_error)?;

        Ok(())
    }

    async fn deduct_quantity(&self, id: PartId, delta: i64) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE parts SET qty = qty - ?1 WHERE id = ?2
            "#,
        )
        .bind(delta)
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(to_store_error)?;

        Ok(())
    }

    async fn deduct_all(&self, deductions: &[(PartId, i64)]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(to_store_error)?;

        for (id, delta) in deductions {
            let result = sqlx::query(
                r#"
                UPDATE parts SET qty = qty - ?1 WHERE id = ?2
                "#,
            )
            .bind(delta)
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(to_store_error)?;

            if result.rows_affected() == 0 {
                // Dropping the transaction rolls back earlier decrements.
                return Err(StoreError::MissingPart(*id));
            }
        }

        tx.commit().await.map_err(to_store_error)?;
        tracing::debug!(count = deductions.len(), "stock deducted");
        Ok(())
    }
}

fn row_to_part(row: &sqlx::sqlite::SqliteRow) -> StoreResult<Part> {
    let id: i64 = row.try_get("id").map_err(to_store_error)?;
    let part_number: String = row.try_get("part_number").map_err(to_store_error)?;
    let name: String = row.try_get("name").map_err(to_store_error)?;
    let category: String = row.try_get("category").map_err(to_store_error)?;
    let color: String = row.try_get("color").map_err(to_store_error)?;
    let qty: i64 = row.try_get("qty").map_err(to_store_error)?;
    let cost: i64 = row.try_get("cost").map_err(to_store_error)?;
    let price: i64 = row.try_get("price").map_err(to_store_error)?;

    Ok(Part {
        id: PartId::from_raw(id),
        part_number,
        name,
        // Labels written by this store always parse; anything else in an
        // existing database reads as Unspecified rather than failing the row.
        category: Category::from_label_lossy(&category),
        color: Color::from_label_lossy(&color),
        qty,
        cost: Money::from_cents(cost.max(0) as u64),
        price: Money::from_cents(price.max(0) as u64),
    })
}

fn to_store_error(err: sqlx::Error) -> StoreError {
    StoreError::backend(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_part(sku: &str, qty: i64, price_cents: u64) -> NewPart {
        NewPart {
            part_number: sku.to_string(),
            name: "Zipper pull".to_string(),
            category: Category::Zipper,
            color: Color::Black,
            qty,
            cost: Money::from_cents(100),
            price: Money::from_cents(price_cents),
        }
    }

    #[tokio::test]
    async fn create_appends_one_matching_row() {
        let store = SqlitePartStore::in_memory().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());

        let created = store.create(new_part("Z-100", 10, 250)).await.unwrap();
        let listed = store.list().await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], created);
        assert_eq!(listed[0].part_number, "Z-100");
        assert_eq!(listed[0].qty, 10);
        assert_eq!(listed[0].price, Money::from_cents(250));
    }

    #[tokio::test]
    async fn created_ids_are_unique_and_list_is_in_insertion_order() {
        let store = SqlitePartStore::in_memory().await.unwrap();
        let a = store.create(new_part("A", 1, 100)).await.unwrap();
        let b = store.create(new_part("B", 2, 100)).await.unwrap();

        assert_ne!(a.id, b.id);
        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].id, a.id);
        assert_eq!(listed[1].id, b.id);
    }

    #[tokio::test]
    async fn duplicate_skus_are_accepted() {
        let store = SqlitePartStore::in_memory().await.unwrap();
        store.create(new_part("Z-100", 1, 100)).await.unwrap();
        store.create(new_part("Z-100", 2, 200)).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_levels_overwrites_only_the_numeric_fields() {
        let store = SqlitePartStore::in_memory().await.unwrap();
        let part = store.create(new_part("Z-100", 10, 250)).await.unwrap();

        store
            .update_levels(part.id, 42, Money::from_cents(110), Money::from_cents(300))
            .await
            .unwrap();

        let updated = store.get(part.id).await.unwrap().unwrap();
        assert_eq!(updated.qty, 42);
        assert_eq!(updated.cost, Money::from_cents(110));
        assert_eq!(updated.price, Money::from_cents(300));
        assert_eq!(updated.part_number, part.part_number);
        assert_eq!(updated.name, part.name);
        assert_eq!(updated.category, part.category);
        assert_eq!(updated.color, part.color);
    }

    #[tokio::test]
    async fn update_levels_on_missing_id_is_a_silent_no_op() {
        let store = SqlitePartStore::in_memory().await.unwrap();
        let part = store.create(new_part("Z-100", 10, 250)).await.unwrap();

        store
            .update_levels(PartId::from_raw(9999), 1, Money::ZERO, Money::ZERO)
            .await
            .unwrap();

        assert_eq!(store.list().await.unwrap(), vec![part]);
    }

    #[tokio::test]
    async fn deduct_quantity_may_go_negative() {
        let store = SqlitePartStore::in_memory().await.unwrap();
        let part = store.create(new_part("Z-100", 2, 250)).await.unwrap();

        store.deduct_quantity(part.id, 5).await.unwrap();

        assert_eq!(store.get(part.id).await.unwrap().unwrap().qty, -3);
    }

    #[tokio::test]
    async fn deduct_all_applies_every_decrement() {
        let store = SqlitePartStore::in_memory().await.unwrap();
        let a = store.create(new_part("A", 10, 100)).await.unwrap();
        let b = store.create(new_part("B", 5, 100)).await.unwrap();

        store.deduct_all(&[(a.id, 3), (b.id, 1)]).await.unwrap();

        assert_eq!(store.get(a.id).await.unwrap().unwrap().qty, 7);
        assert_eq!(store.get(b.id).await.unwrap().unwrap().qty, 4);
    }

    #[tokio::test]
    async fn deduct_all_rolls_back_on_a_missing_part() {
        let store = SqlitePartStore::in_memory().await.unwrap();
        let a = store.create(new_part("A", 10, 100)).await.unwrap();
        let missing = PartId::from_raw(9999);

        let err = store.deduct_all(&[(a.id, 3), (missing, 1)]).await.unwrap_err();

        assert_eq!(err, StoreError::MissingPart(missing));
        assert_eq!(store.get(a.id).await.unwrap().unwrap().qty, 10);
    }

    #[tokio::test]
    async fn unknown_stored_labels_read_as_unspecified() {
        let store = SqlitePartStore::in_memory().await.unwrap();
        sqlx::query(
            "INSERT INTO parts (part_number, name, category, color, qty, cost, price)
             VALUES ('X-1', 'Mystery', 'Leather', 'Chartreuse', 1, 0, 0)",
        )
        .execute(&store.pool)
        .await
        .unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].category, Category::Unspecified);
        assert_eq!(listed[0].color, Color::Unspecified);
    }

    #[tokio::test]
    async fn open_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atelier.db");

        {
            let store = SqlitePartStore::open(&path).await.unwrap();
            store.create(new_part("Z-100", 10, 250)).await.unwrap();
        }

        let reopened = SqlitePartStore::open(&path).await.unwrap();
        let listed = reopened.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].part_number, "Z-100");
    }
}
