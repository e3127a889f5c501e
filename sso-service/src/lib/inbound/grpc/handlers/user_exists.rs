use std::sync::Arc;

use tonic::Status;

use super::require_id;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::UserExistsRequest;
use crate::proto::UserExistsResponse;

pub async fn user_exists<S: AuthServicePort>(
    service: Arc<S>,
    request: UserExistsRequest,
) -> Result<UserExistsResponse, Status> {
    require_id(request.user_id, "user_id")?;

    let exists = service.user_exists(UserId(request.user_id)).await?;

    Ok(UserExistsResponse { exists })
}
