//! Authentication gate for the proxy pipeline.
//!
//! Every request that is not on the allow-list must carry a bearer credential,
//! which is validated against the remote auth service. Authenticated requests
//! are forwarded with identity headers attached; everything else stops here
//! with a bare 401.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderValue, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::GatewayError;
use crate::state::AppState;

/// Identity headers stamped onto authenticated requests. Downstream services
/// trust these, so the gate owns them exclusively.
pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLES_HEADER: &str = "x-user-roles";

const BEARER_PREFIX: &str = "Bearer ";

/// Layer the gate onto the downstream stage of the pipeline.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, auth_gate))
}

async fn auth_gate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, GatewayError> {
    let path = req.uri().path().to_string();

    if state.allow_list.contains(&path) {
        return Ok(next.run(req).await);
    }

    tracing::debug!(method = %req.method(), path = %path, "authenticating request");

    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!(path = %path, "missing authorization header");
            GatewayError::Unauthorized
        })?;

    let token = auth.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        tracing::warn!(path = %path, "authorization header is not a bearer credential");
        GatewayError::Unauthorized
    })?;

    let user = match state.validator.validate(token).await {
        Ok(user) => user,
        Err(err) => {
            // Log the distinct failure kind (never the token); the response
            // stays a uniform 401 either way.
            tracing::warn!(path = %path, kind = err.kind(), error = %err, "token validation failed");
            return Err(GatewayError::Unauthorized);
        }
    };

    // `insert` overwrites: client-supplied identity headers must never reach
    // a downstream service.
    let user_id = header_value(&user.id, &path)?;
    let user_roles = header_value(&user.roles.join(","), &path)?;
    let headers = req.headers_mut();
    headers.insert(USER_ID_HEADER, user_id);
    headers.insert(USER_ROLES_HEADER, user_roles);

    Ok(next.run(req).await)
}

fn header_value(value: &str, path: &str) -> Result<HeaderValue, GatewayError> {
    HeaderValue::from_str(value).map_err(|_| {
        tracing::warn!(path = %path, "auth service returned identity not representable as a header");
        GatewayError::Unauthorized
    })
}
