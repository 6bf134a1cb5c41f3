use axum::http::StatusCode;

use crate::inbound::http::extractors::AuthenticatedUser;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;

/// Echo the resolved identity. No further authorization applies.
pub async fn get_current_user(
    AuthenticatedUser(caller): AuthenticatedUser,
) -> ApiSuccess<UserData> {
    ApiSuccess::new(StatusCode::OK, (&caller).into())
}
