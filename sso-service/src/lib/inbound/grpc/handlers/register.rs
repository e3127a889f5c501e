use std::sync::Arc;

use tonic::Status;

use super::require_text;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: Arc<S>,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    require_text(&request.email, "email")?;
    require_text(&request.password, "password")?;
    require_text(&request.first_name, "first_name")?;
    require_text(&request.last_name, "last_name")?;

    let command = RegisterUserCommand::new(
        request.email,
        request.password,
        request.first_name,
        request.last_name,
        request.middle_name,
    );
    let user_id = service.register_new_user(command).await?;

    Ok(RegisterResponse { user_id: user_id.0 })
}
