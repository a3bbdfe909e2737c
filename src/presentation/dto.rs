use serde::{Deserialize, Serialize};
use crate::domain::entities::Branch;
use crate::shared::error::BranchxError;
use crate::shared::result::Result;

/// 分支 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchDto {
    pub id: Option<i64>,
    pub name: String,
    pub user_id: i64,
    pub address: String,
    pub city: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl From<Branch> for BranchDto {
    fn from(branch: Branch) -> Self {
        Self {
            id: branch.id,
            name: branch.name,
            user_id: branch.user_id,
            address: branch.address,
            city: branch.city,
            latitude: branch.latitude,
            longitude: branch.longitude,
        }
    }
}

/// 新建分支请求，字段均可缺省以便返回明确的约束错误；传入的 id 会被忽略
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBranchRequest {
    pub name: Option<String>,
    pub user_id: Option<i64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

fn required<T>(value: Option<T>, index: usize, field: &str) -> Result<T> {
    value.ok_or_else(|| {
        BranchxError::ConstraintViolation(format!("branches[{}].{} must not be null", index, field))
    })
}

impl NewBranchRequest {
    /// 校验必填字段并转换为实体，`index` 为请求数组中的位置
    pub fn into_branch(self, index: usize) -> Result<Branch> {
        let branch = Branch::new(
            required(self.name, index, "name")?,
            required(self.user_id, index, "userId")?,
            required(self.address, index, "address")?,
            required(self.city, index, "city")?,
        );
        Ok(branch.with_location(self.latitude, self.longitude))
    }
}

/// 按用户查询参数
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(rename = "userId")]
    pub user_id: i64,
}
