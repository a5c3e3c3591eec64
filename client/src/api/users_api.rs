use shared::{
    CreateUserRequest, MessageResponse, Paginated, UpdateUserRequest, User, UserFilter, UserListQuery,
    UserProfilePatch, UserResponse,
};
use tracing::{info, warn};

use super::{acknowledged, FieldError, FormOutcome, USER_ALREADY_EXISTS};
use crate::download::Download;
use crate::error::Result;
use crate::pipeline::{ApiClient, ApiRequest};

pub async fn list_users(client: &ApiClient, query: &UserListQuery) -> Result<Paginated<User>> {
    client
        .results(ApiRequest::get("users/list").query(query.to_query()))
        .await
}

/// Agents offered in the survey assignment pickers.
pub async fn list_agents(client: &ApiClient) -> Result<Vec<User>> {
    let page: Paginated<User> = client
        .results(ApiRequest::get("users/list").query([("role", "agent")]))
        .await?;
    Ok(page.docs)
}

pub async fn export_users_csv(client: &ApiClient, search: Option<&str>, filter: &UserFilter) -> Result<Download> {
    let query = UserListQuery {
        search: search.map(str::to_owned),
        filter: filter.clone(),
        ..UserListQuery::default()
    };
    client
        .download(ApiRequest::get("users/export").query(query.to_query()), None)
        .await
}

/// Creates an agent account. Any failure lands on the email field.
pub async fn create_user(client: &ApiClient, request: &CreateUserRequest) -> FormOutcome {
    let outcome = match ApiRequest::post("users/create-agent").json(request) {
        Ok(api_request) => client.json::<UserResponse>(api_request).await,
        Err(error) => Err(error),
    };
    match outcome {
        Ok(envelope) if envelope.is_success() => {
            info!(email = %request.email, "Agent created");
            FormOutcome::Accepted
        }
        Ok(envelope) if !envelope.message.is_empty() => {
            FormOutcome::Rejected(FieldError::new("email", envelope.message))
        }
        Ok(_) => FormOutcome::Rejected(FieldError::new("email", USER_ALREADY_EXISTS)),
        Err(error) => {
            warn!(%error, "Agent creation failed");
            FormOutcome::Rejected(FieldError::new("email", USER_ALREADY_EXISTS))
        }
    }
}

/// Updates a user. When it is the signed-in user the session copy is
/// patched too.
pub async fn update_user(client: &ApiClient, request: &UpdateUserRequest) -> Result<User> {
    let user: User = client
        .results(ApiRequest::put("users/update").json(request)?)
        .await?;
    let is_current = client
        .store()
        .user()
        .is_some_and(|current| current.id == request.id);
    if is_current {
        client.store().update_user_data(UserProfilePatch {
            full_name: request.full_name.clone(),
            phone: request.phone.clone(),
            counting_post: request.counting_post,
            ..UserProfilePatch::default()
        });
    }
    Ok(user)
}

pub async fn delete_user(client: &ApiClient, id: &str) -> Result<MessageResponse> {
    acknowledged(client, ApiRequest::delete("users/delete").query([("id", id)])).await
}

pub async fn user_details(client: &ApiClient, id: &str) -> Result<User> {
    client
        .results(ApiRequest::get("users/details").query([("id", id)]))
        .await
}
