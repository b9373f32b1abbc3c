//! Admin service

use tracing::instrument;

use crate::dto::AdminLogResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Largest page of admin log rows
const MAX_LOGS: i64 = 200;

/// Admin service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    /// Create a new AdminService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Latest admin actions, newest first
    #[instrument(skip(self))]
    pub async fn recent_logs(&self, limit: Option<i64>) -> ServiceResult<Vec<AdminLogResponse>> {
        let limit = limit.unwrap_or(50).clamp(1, MAX_LOGS);
        let logs = self.ctx.admin_log_repo().recent(limit).await?;
        Ok(logs.into_iter().map(AdminLogResponse::from).collect())
    }
}
