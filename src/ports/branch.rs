use async_trait::async_trait;
use crate::domain::entities::Branch;
use crate::shared::result::Result;

/// 分支仓储接口（持久化网关）
///
/// 只返回原始结果：查询不到时返回 `None` 或空列表，不产生领域错误。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BranchPort: Send + Sync {
    /// 批量保存分支，返回带有数据库生成 ID 的分支，顺序与输入一致
    async fn save_all(&self, branches: Vec<Branch>) -> Result<Vec<Branch>>;

    /// 根据 ID 删除分支，ID 不存在时不做任何操作
    async fn delete_by_id(&self, id: i64) -> Result<()>;

    /// 根据 ID 查找分支
    async fn find_by_id(&self, id: i64) -> Result<Option<Branch>>;

    /// 根据用户 ID 查询所有分支
    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Branch>>;
}
