//! JWT authentication middleware.
//!
//! Tokens are minted by the external authentication service and verified
//! here with a shared HS256 secret. A request without an Authorization
//! header passes through as anonymous; a presented token must be valid or
//! the request is rejected. Handlers that require an authenticated actor
//! read the identity with [`current_user`] and reject `None` themselves.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpRequest,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// JWT claims structure shared with the authentication service
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Username at token mint time
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Authenticated viewer identity extracted from a verified token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

/// Viewer identity stored on the request by [`JwtAuth`], or `None` for an
/// anonymous request.
pub fn current_user(req: &HttpRequest) -> Option<CurrentUser> {
    req.extensions().get::<CurrentUser>().cloned()
}

/// JWT authentication middleware
pub struct JwtAuth {
    secret: String,
}

impl JwtAuth {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service,
            secret: self.secret.clone(),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: S,
    secret: String,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth_header = req.headers().get("Authorization");

        // No header: anonymous request
        if auth_header.is_none() {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await });
        }

        let auth_str = match auth_header.unwrap().to_str() {
            Ok(s) => s,
            Err(_) => {
                return Box::pin(async move {
                    Err(AppError::Unauthorized("Invalid Authorization header".into()).into())
                });
            }
        };

        let token = match auth_str.strip_prefix("Bearer ") {
            Some(t) => t,
            None => {
                return Box::pin(async move {
                    Err(
                        AppError::Unauthorized("Authorization must use Bearer scheme".into())
                            .into(),
                    )
                });
            }
        };

        let validation = Validation::new(Algorithm::HS256);
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());

        let token_data = match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("JWT validation failed: {}", e);
                return Box::pin(async move {
                    Err(AppError::Unauthorized(format!("Invalid token: {}", e)).into())
                });
            }
        };

        let user_id = match Uuid::parse_str(&token_data.claims.sub) {
            Ok(id) => id,
            Err(_) => {
                return Box::pin(async move {
                    Err(AppError::Unauthorized("Invalid token: malformed subject".into()).into())
                });
            }
        };

        req.extensions_mut().insert(CurrentUser {
            id: user_id,
            username: token_data.claims.username.clone(),
        });

        let fut = self.service.call(req);
        Box::pin(async move { fut.await })
    }
}
