use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use sqlx::error::ErrorKind;

/// 统一的错误类型
#[derive(Debug, thiserror::Error)]
pub enum BranchxError {
    /// 分支未找到
    #[error("Branch with id {0} not found.")]
    BranchNotFound(i64),

    /// 必填字段缺失或违反存储约束
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// 请求格式错误
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// SQLx 数据库错误
    #[error("SQLx error: {0}")]
    Sqlx(#[source] sqlx::Error),

    /// 数据库迁移错误
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BranchxError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BranchxError::BranchNotFound(_) => StatusCode::NOT_FOUND,
            BranchxError::ConstraintViolation(_) => StatusCode::BAD_REQUEST,
            BranchxError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 存储层的非空/检查约束失败归为约束错误，其余保持原样
impl From<sqlx::Error> for BranchxError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if matches!(db_err.kind(), ErrorKind::NotNullViolation | ErrorKind::CheckViolation) {
                return BranchxError::ConstraintViolation(db_err.message().to_string());
            }
        }
        BranchxError::Sqlx(err)
    }
}

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
}

/// 用于 Axum 的错误响应实现
impl IntoResponse for BranchxError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            BranchxError::BranchNotFound(_)
            | BranchxError::ConstraintViolation(_)
            | BranchxError::BadRequest(_) => self.to_string(),
            BranchxError::Sqlx(_) | BranchxError::Migration(_) => "Database error".to_string(),
            _ => "Internal server error".to_string(),
        };

        if status.is_server_error() {
            tracing::error!("Request error: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        let body = ErrorBody {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// 从字符串创建配置错误
impl From<String> for BranchxError {
    fn from(s: String) -> Self {
        BranchxError::Config(s)
    }
}
