use crate::presentation::extractors::AuthUser;
use crate::shared::error::AppError;
use axum::{extract::Request, middleware::Next, response::Response};

/// Gate for admin routes: the access token must carry the admin role.
/// The role is read from the provider's custom claims at login and refresh.
pub async fn require_admin(
    auth_user: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !auth_user.claims.role.is_admin() {
        tracing::warn!(uid = %auth_user.uid(), "non-admin token on admin route");
        return Err(AppError::Forbidden("Admin role required".to_string()));
    }

    Ok(next.run(request).await)
}
