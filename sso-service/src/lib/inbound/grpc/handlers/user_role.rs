use std::sync::Arc;

use tonic::Status;

use super::require_id;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::UserRoleRequest;
use crate::proto::UserRoleResponse;

pub async fn user_role<S: AuthServicePort>(
    service: Arc<S>,
    request: UserRoleRequest,
) -> Result<UserRoleResponse, Status> {
    require_id(request.user_id, "user_id")?;

    let role = service.user_role(UserId(request.user_id)).await?;

    Ok(UserRoleResponse { role })
}
