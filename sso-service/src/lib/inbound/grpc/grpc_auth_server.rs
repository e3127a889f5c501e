use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::login;
use super::handlers::register;
use super::handlers::user_exists;
use super::handlers::user_role;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::auth_server::Auth as AuthProto;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;
use crate::proto::UserExistsRequest;
use crate::proto::UserExistsResponse;
use crate::proto::UserRoleRequest;
use crate::proto::UserRoleResponse;

pub struct AuthGrpcService<S: AuthServicePort> {
    service: Arc<S>,
}

impl<S: AuthServicePort> AuthGrpcService<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<S: AuthServicePort> AuthProto for AuthGrpcService<S> {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let response = register::register(Arc::clone(&self.service), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let response = login::login(Arc::clone(&self.service), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn user_role(
        &self,
        request: Request<UserRoleRequest>,
    ) -> Result<Response<UserRoleResponse>, Status> {
        let response =
            user_role::user_role(Arc::clone(&self.service), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn user_exists(
        &self,
        request: Request<UserExistsRequest>,
    ) -> Result<Response<UserExistsResponse>, Status> {
        let response =
            user_exists::user_exists(Arc::clone(&self.service), request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
