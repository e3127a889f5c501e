use std::sync::Arc;

use tonic::Status;

use super::require_id;
use super::require_text;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S: AuthServicePort>(
    service: Arc<S>,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    require_text(&request.email, "email")?;
    require_text(&request.password, "password")?;
    require_id(i64::from(request.app_id), "app_id")?;

    let command = LoginCommand::new(request.email, request.password, AppId(request.app_id));
    let token = service.login(command).await?;

    Ok(LoginResponse { token })
}
