use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;
use crate::domain::entities::Branch;
use crate::ports::branch::BranchPort;
use crate::shared::result::Result;

/// SQLite 分支仓储实现
pub struct SqliteBranchRepository {
    pool: SqlitePool,
}

impl SqliteBranchRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn branch_from_row(r: &SqliteRow) -> Branch {
    Branch {
        id: Some(r.get("id")),
        name: r.get("name"),
        user_id: r.get("user_id"),
        address: r.get("address"),
        city: r.get("city"),
        latitude: r.get("latitude"),
        longitude: r.get("longitude"),
    }
}

#[async_trait]
impl BranchPort for SqliteBranchRepository {
    async fn save_all(&self, branches: Vec<Branch>) -> Result<Vec<Branch>> {
        if branches.is_empty() {
            return Ok(branches);
        }

        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(branches.len());

        for branch in branches {
            let row = match branch.id {
                None => {
                    sqlx::query(
                        r#"
                        INSERT INTO branches (name, user_id, address, city, latitude, longitude)
                        VALUES (?, ?, ?, ?, ?, ?)
                        RETURNING id
                        "#,
                    )
                    .bind(&branch.name)
                    .bind(branch.user_id)
                    .bind(&branch.address)
                    .bind(&branch.city)
                    .bind(&branch.latitude)
                    .bind(&branch.longitude)
                    .fetch_one(&mut *tx)
                    .await?
                }
                Some(id) => {
                    sqlx::query(
                        r#"
                        INSERT INTO branches (id, name, user_id, address, city, latitude, longitude)
                        VALUES (?, ?, ?, ?, ?, ?, ?)
                        ON CONFLICT(id) DO UPDATE SET
                            name = excluded.name,
                            user_id = excluded.user_id,
                            address = excluded.address,
                            city = excluded.city,
                            latitude = excluded.latitude,
                            longitude = excluded.longitude
                        RETURNING id
                        "#,
                    )
                    .bind(id)
                    .bind(&branch.name)
                    .bind(branch.user_id)
                    .bind(&branch.address)
                    .bind(&branch.city)
                    .bind(&branch.latitude)
                    .bind(&branch.longitude)
                    .fetch_one(&mut *tx)
                    .await?
                }
            };

            saved.push(branch.with_id(row.get("id")));
        }

        tx.commit().await?;
        debug!("Saved {} branches", saved.len());
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM branches WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!("Delete of branch {} matched no rows", id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Branch>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, user_id, address, city, latitude, longitude
            FROM branches
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(branch_from_row))
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Branch>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, user_id, address, city, latitude, longitude
            FROM branches
            WHERE user_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(branch_from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::memory_pool;
    use crate::shared::error::BranchxError;

    fn olavarria() -> Branch {
        Branch::new(
            "Olavarria 560".to_string(),
            1,
            "3460, Avenida Vertiz".to_string(),
            "Mar del Plata".to_string(),
        )
    }

    fn corrientes() -> Branch {
        Branch::new(
            "Corrientes 1500".to_string(),
            1,
            "4776, Lavalle".to_string(),
            "Mar del Plata".to_string(),
        )
    }

    #[tokio::test]
    async fn save_all_assigns_unique_ids_in_input_order() {
        let repo = SqliteBranchRepository::new(memory_pool().await);

        let saved = repo.save_all(vec![olavarria(), corrientes()]).await.unwrap();

        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].name, "Olavarria 560");
        assert_eq!(saved[1].name, "Corrientes 1500");
        let (a, b) = (saved[0].id.unwrap(), saved[1].id.unwrap());
        assert_ne!(a, b);
        assert_eq!(saved[0], olavarria().with_id(a));
        assert_eq!(saved[1], corrientes().with_id(b));
    }

    #[tokio::test]
    async fn save_all_with_empty_input_is_a_no_op() {
        let repo = SqliteBranchRepository::new(memory_pool().await);
        assert!(repo.save_all(vec![]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_by_id_returns_saved_branch() {
        let repo = SqliteBranchRepository::new(memory_pool().await);
        let branch = olavarria().with_location(Some("-38.0".to_string()), Some("-57.5".to_string()));

        let saved = repo.save_all(vec![branch]).await.unwrap();
        let id = saved[0].id.unwrap();

        let found = repo.find_by_id(id).await.unwrap();
        assert_eq!(found, Some(saved[0].clone()));
    }

    #[tokio::test]
    async fn find_by_id_absent_is_none() {
        let repo = SqliteBranchRepository::new(memory_pool().await);
        assert_eq!(repo.find_by_id(150).await.unwrap(), None);
    }

    #[tokio::test]
    async fn find_by_user_id_filters_by_owner() {
        let repo = SqliteBranchRepository::new(memory_pool().await);
        let mut other = corrientes();
        other.user_id = 2;

        repo.save_all(vec![olavarria(), other, corrientes()]).await.unwrap();

        let owned = repo.find_by_user_id(1).await.unwrap();
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|b| b.user_id == 1));
        assert_eq!(repo.find_by_user_id(2).await.unwrap().len(), 1);
        assert!(repo.find_by_user_id(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_row_and_ignores_missing_ids() {
        let repo = SqliteBranchRepository::new(memory_pool().await);
        let saved = repo.save_all(vec![olavarria()]).await.unwrap();
        let id = saved[0].id.unwrap();

        repo.delete_by_id(id).await.unwrap();
        assert_eq!(repo.find_by_id(id).await.unwrap(), None);

        repo.delete_by_id(id).await.unwrap();
        repo.delete_by_id(150).await.unwrap();
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = SqliteBranchRepository::new(memory_pool().await);
        let first = repo.save_all(vec![olavarria()]).await.unwrap()[0].id.unwrap();
        repo.delete_by_id(first).await.unwrap();

        let second = repo.save_all(vec![corrientes()]).await.unwrap()[0].id.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn save_all_with_existing_id_updates_row() {
        let repo = SqliteBranchRepository::new(memory_pool().await);
        let mut saved = repo.save_all(vec![olavarria()]).await.unwrap().remove(0);
        saved.city = "Buenos Aires".to_string();

        let updated = repo.save_all(vec![saved.clone()]).await.unwrap();
        assert_eq!(updated[0].id, saved.id);

        let found = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.city, "Buenos Aires");
        assert_eq!(repo.find_by_user_id(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn null_required_column_is_a_constraint_violation() {
        let pool = memory_pool().await;

        let err = sqlx::query("INSERT INTO branches (name, user_id, address, city) VALUES (NULL, 1, 'a', 'b')")
            .execute(&pool)
            .await
            .unwrap_err();

        assert!(matches!(BranchxError::from(err), BranchxError::ConstraintViolation(_)));
    }
}
