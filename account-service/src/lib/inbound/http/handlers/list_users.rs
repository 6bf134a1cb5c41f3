use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::extractors::AuthenticatedUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let users = state.user_service.list_users(&caller).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        users.iter().map(UserData::from).collect(),
    ))
}
