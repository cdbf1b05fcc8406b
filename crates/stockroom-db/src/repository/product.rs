//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Lookup by id, list, substring search
//! - Create, full update, partial update, delete
//! - Transactional bulk create
//!
//! ## Bulk Create
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    All-or-nothing bulk insert                           │
//! │                                                                         │
//! │  drafts (already validated by stockroom-core)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │  INSERT draft[0] ─► ok                                                  │
//! │  INSERT draft[1] ─► ok                                                  │
//! │  INSERT draft[2] ─► error ──► transaction dropped ──► ROLLBACK          │
//! │       │                                                                 │
//! │       ▼ (all ok)                                                        │
//! │  COMMIT ─► rows visible to other connections                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every statement binds user input through `?N` parameters; no SQL is ever
//! built from request data.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use stockroom_core::{Product, ProductDraft, ProductPatch};

const PRODUCT_COLUMNS: &str = "id, name, price, stock, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let created = repo.create(&draft).await?;
/// let product = repo.get_by_id(created.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Product found
    /// * `Err(DbError::NotFound)` - No row with this id
    pub async fn get_by_id(&self, id: i64) -> DbResult<Product> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Lists every product, ascending by id. Empty table gives an empty vec.
    pub async fn get_all(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id ASC");

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Searches products whose name contains `term`.
    ///
    /// ## How It Works
    /// `LIKE '%term%'` with `%`, `_` and `\` in the term escaped, so they
    /// match literally. Case follows SQLite's default (ASCII
    /// case-insensitive). No match is an empty vec, never `NotFound`.
    pub async fn search(&self, term: &str) -> DbResult<Vec<Product>> {
        debug!(term = %term, "Searching products");

        let pattern = format!("%{}%", escape_like(term));
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE name LIKE ?1 ESCAPE '\\' ORDER BY id ASC"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// Both timestamps get the same clock reading, so a fresh row has
    /// `created_at == updated_at`. The returned value is the stored row.
    pub async fn create(&self, draft: &ProductDraft) -> DbResult<Product> {
        debug!(name = %draft.name(), "Inserting product");

        let now = Utc::now();
        let sql = format!(
            "INSERT INTO products (name, price, stock, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?4) \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(draft.name())
            .bind(draft.price())
            .bind(draft.stock())
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        debug!(id = product.id, "Product inserted");
        Ok(product)
    }

    /// Replaces name, price and stock of an existing product.
    ///
    /// `id` and `created_at` are never written; `updated_at` is refreshed.
    /// The returned product comes from the same statement (`RETURNING`),
    /// there is no second read.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No row with this id; nothing changed
    pub async fn update(&self, id: i64, draft: &ProductDraft) -> DbResult<Product> {
        debug!(id = id, "Updating product");

        let now = Utc::now();
        let sql = format!(
            "UPDATE products SET name = ?2, price = ?3, stock = ?4, updated_at = ?5 \
             WHERE id = ?1 \
             RETURNING {PRODUCT_COLUMNS}"
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(draft.name())
            .bind(draft.price())
            .bind(draft.stock())
            .bind(now)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Applies only the fields present in `patch`.
    ///
    /// Absent fields keep their stored value (`COALESCE(NULL, column)`).
    /// `ProductPatch` always carries at least one field, so an empty update
    /// can't reach this point.
    pub async fn partial_update(&self, id: i64, patch: &ProductPatch) -> DbResult<Product> {
        debug!(id = id, "Patching product");

        let now = Utc::now();
        let sql = format!(
            "UPDATE products SET \
                 name = COALESCE(?2, name), \
                 price = COALESCE(?3, price), \
                 stock = COALESCE(?4, stock), \
                 updated_at = ?5 \
             WHERE id = ?1 \
             RETURNING {PRODUCT_COLUMNS}"
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(patch.name())
            .bind(patch.price())
            .bind(patch.stock())
            .bind(now)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Physically removes a product. There is no soft delete.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Inserts every draft inside one transaction.
    ///
    /// If any insert fails the transaction is dropped without commit, which
    /// rolls back every row written so far. Callers validate the whole batch
    /// first (`stockroom_core::validation::validate_batch`).
    pub async fn bulk_create(&self, drafts: &[ProductDraft]) -> DbResult<Vec<Product>> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(count = drafts.len(), "Bulk inserting products");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let now = Utc::now();
        let sql = format!(
            "INSERT INTO products (name, price, stock, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?4) \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let mut created = Vec::with_capacity(drafts.len());
        for (index, draft) in drafts.iter().enumerate() {
            let inserted = sqlx::query_as::<_, Product>(&sql)
                .bind(draft.name())
                .bind(draft.price())
                .bind(draft.stock())
                .bind(now)
                .fetch_one(&mut *tx)
                .await;

            match inserted {
                Ok(product) => created.push(product),
                Err(e) => {
                    warn!(index = index, error = %e, "Bulk insert failed, rolling back");
                    if let Err(rollback_err) = tx.rollback().await {
                        warn!(error = %rollback_err, "Rollback failed");
                    }
                    return Err(e.into());
                }
            }
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(count = created.len(), "Bulk insert committed");
        Ok(created)
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Deletes every product. Returns the number of rows removed.
    ///
    /// ## Usage
    /// Test isolation against a file-backed store.
    pub async fn clear(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Escapes LIKE wildcards so the term matches as a plain substring.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use stockroom_core::validation::{validate_batch, validate_draft, validate_patch};
    use stockroom_core::ProductPayload;

    async fn repo() -> ProductRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
    }

    fn payload(name: &str, price: f64, stock: i64) -> ProductPayload {
        ProductPayload {
            name: Some(name.to_string()),
            price: Some(price),
            stock: Some(stock),
        }
    }

    fn draft(name: &str, price: f64, stock: i64) -> ProductDraft {
        validate_draft(payload(name, price, stock)).unwrap()
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("cola"), "cola");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = repo().await;

        let created = repo.create(&draft("Test Product", 99.99, 10)).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);

        let found = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(found.name, "Test Product");
        assert_eq!(found.price, 99.99);
        assert_eq!(found.stock, 10);
        assert_eq!(found.created_at, found.updated_at);
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = repo().await;

        let err = repo.get_by_id(999).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_all_ordered_by_id() {
        let repo = repo().await;
        assert!(repo.get_all().await.unwrap().is_empty());

        let a = repo.create(&draft("B-second-name", 1.0, 1)).await.unwrap();
        let b = repo.create(&draft("A-first-name", 2.0, 2)).await.unwrap();

        let all = repo.get_all().await.unwrap();
        let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn test_search_substring() {
        let repo = repo().await;
        repo.create(&draft("Apple", 1.0, 1)).await.unwrap();
        repo.create(&draft("Pineapple", 2.0, 1)).await.unwrap();
        repo.create(&draft("Banana", 3.0, 1)).await.unwrap();

        let names: Vec<String> = repo
            .search("apple")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Apple", "Pineapple"]);

        assert!(repo.search("cherry").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_wildcards_are_literal() {
        let repo = repo().await;
        repo.create(&draft("100% juice", 1.0, 1)).await.unwrap();
        repo.create(&draft("1000 juice", 1.0, 1)).await.unwrap();
        repo.create(&draft("snake_case", 1.0, 1)).await.unwrap();
        repo.create(&draft("snakeXcase", 1.0, 1)).await.unwrap();

        let hits = repo.search("0%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "100% juice");

        let hits = repo.search("e_c").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "snake_case");
    }

    #[tokio::test]
    async fn test_update_keeps_identity() {
        let repo = repo().await;
        let created = repo.create(&draft("Old", 1.0, 1)).await.unwrap();

        let updated = repo.update(created.id, &draft("New", 2.5, 7)).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let stored = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(stored.name, "New");
        assert_eq!(stored.price, 2.5);
        assert_eq!(stored.stock, 7);
        assert_eq!(stored.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_leaves_table_unchanged() {
        let repo = repo().await;
        let existing = repo.create(&draft("Keep", 1.0, 1)).await.unwrap();

        let err = repo.update(existing.id + 100, &draft("X", 1.0, 1)).await.unwrap_err();
        assert!(err.is_not_found());

        assert_eq!(repo.get_all().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn test_partial_update_only_touches_present_fields() {
        let repo = repo().await;
        let created = repo.create(&draft("Widget", 10.0, 5)).await.unwrap();

        let patch = validate_patch(ProductPayload {
            price: Some(123.45),
            ..Default::default()
        })
        .unwrap();
        let patched = repo.partial_update(created.id, &patch).await.unwrap();

        assert_eq!(patched.price, 123.45);
        assert_eq!(patched.name, "Widget");
        assert_eq!(patched.stock, 5);
        assert_eq!(patched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_partial_update_missing_is_not_found() {
        let repo = repo().await;
        let patch = validate_patch(ProductPayload {
            stock: Some(0),
            ..Default::default()
        })
        .unwrap();

        assert!(repo.partial_update(1, &patch).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let repo = repo().await;
        let created = repo.create(&draft("Gone", 1.0, 1)).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(repo.get_by_id(created.id).await.unwrap_err().is_not_found());
        assert!(repo.delete(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_bulk_create_inserts_all() {
        let repo = repo().await;
        let drafts = validate_batch(vec![payload("A", 10.0, 1), payload("B", 20.0, 2)]).unwrap();

        let created = repo.bulk_create(&drafts).await.unwrap();
        assert_eq!(created.len(), 2);
        assert!(created[0].id < created[1].id);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_bulk_create_empty_is_noop() {
        let repo = repo().await;

        assert!(repo.bulk_create(&[]).await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bulk_create_rolls_back_on_failure() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        // Make the second insert fail inside the transaction.
        sqlx::query(
            "CREATE TRIGGER reject_b BEFORE INSERT ON products \
             WHEN NEW.name = 'B' BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let drafts = validate_batch(vec![payload("A", 10.0, 1), payload("B", 20.0, 2)]).unwrap();
        let err = repo.bulk_create(&drafts).await.unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear() {
        let repo = repo().await;
        repo.create(&draft("A", 1.0, 1)).await.unwrap();
        repo.create(&draft("B", 1.0, 1)).await.unwrap();

        assert_eq!(repo.clear().await.unwrap(), 2);
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
