use crate::shared::error::BranchxError;

/// 统一的 Result 类型别名
pub type Result<T> = std::result::Result<T, BranchxError>;
