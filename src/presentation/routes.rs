use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use crate::presentation::handlers;
use crate::services::branch::BranchService;

/// 应用状态
pub struct AppContext {
    pub branch_service: Arc<BranchService>,
}

/// 创建应用路由
pub fn create_app_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route(
            "/branches",
            get(handlers::branch::api_list_branches_by_user)
                .post(handlers::branch::api_save_branches),
        )
        .route(
            "/branches/{id}",
            get(handlers::branch::api_get_branch)
                .delete(handlers::branch::api_delete_branch),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
