use std::sync::Arc;
use tracing::info;
use crate::domain::entities::Branch;
use crate::ports::branch::BranchPort;
use crate::shared::error::BranchxError;
use crate::shared::result::Result;

/// 分支服务
///
/// 除 `get_by_id` 将空结果转换为 `BranchNotFound` 外，其余操作直接委托给仓储。
pub struct BranchService {
    branch_store: Arc<dyn BranchPort>,
}

impl BranchService {
    pub fn new(branch_store: Arc<dyn BranchPort>) -> Self {
        Self { branch_store }
    }

    pub async fn save(&self, branches: Vec<Branch>) -> Result<Vec<Branch>> {
        let saved = self.branch_store.save_all(branches).await?;
        info!("Saved {} branches", saved.len());
        Ok(saved)
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.branch_store.delete_by_id(id).await?;
        info!("Deleted branch {}", id);
        Ok(())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Branch> {
        self.branch_store
            .find_by_id(id)
            .await?
            .ok_or(BranchxError::BranchNotFound(id))
    }

    pub async fn get_by_user_id(&self, user_id: i64) -> Result<Vec<Branch>> {
        self.branch_store.find_by_user_id(user_id).await
    }
}
