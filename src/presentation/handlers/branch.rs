use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use crate::presentation::dto::{BranchDto, NewBranchRequest, UserQuery};
use crate::presentation::routes::AppContext;
use crate::shared::error::BranchxError;
use crate::shared::result::Result;

/// API: 批量创建分支，返回保存后的分支（含 ID）
pub async fn api_save_branches(
    State(ctx): State<Arc<AppContext>>,
    payload: std::result::Result<Json<Vec<NewBranchRequest>>, JsonRejection>,
) -> Result<Json<Vec<BranchDto>>> {
    let Json(requests) = payload.map_err(|e| BranchxError::BadRequest(e.body_text()))?;

    let branches = requests
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_branch(i))
        .collect::<Result<Vec<_>>>()?;

    let saved = ctx.branch_service.save(branches).await?;

    Ok(Json(saved.into_iter().map(Into::into).collect()))
}

/// API: 删除分支，ID 不存在时同样返回 200
pub async fn api_delete_branch(
    State(ctx): State<Arc<AppContext>>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = id.map_err(|e| BranchxError::BadRequest(e.body_text()))?;
    ctx.branch_service.delete_by_id(id).await?;
    Ok(StatusCode::OK)
}

/// API: 获取单个分支
pub async fn api_get_branch(
    State(ctx): State<Arc<AppContext>>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<BranchDto>> {
    let Path(id) = id.map_err(|e| BranchxError::BadRequest(e.body_text()))?;
    let branch = ctx.branch_service.get_by_id(id).await?;
    Ok(Json(branch.into()))
}

/// API: 列出用户的所有分支
pub async fn api_list_branches_by_user(
    State(ctx): State<Arc<AppContext>>,
    query: std::result::Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<Vec<BranchDto>>> {
    let Query(query) = query.map_err(|e| BranchxError::BadRequest(e.body_text()))?;
    let branches = ctx.branch_service.get_by_user_id(query.user_id).await?;
    Ok(Json(branches.into_iter().map(Into::into).collect()))
}
