//! Contact API routes
//!
//! All five operations require a verified `AuthUser`; the service layer
//! scopes every store access to that user's records.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::repositories::ContactRecord;
use crate::services::ContactService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use contact_keeper_shared::types::{
    ContactIdQuery, ContactListResponse, ContactResponse, CreateContactRequest, EditContactRequest,
};

/// Create contact routes
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(create_contact))
        .route("/get-contacts", get(list_contacts))
        .route("/get-contact", get(get_contact))
        .route("/edit-contact", put(edit_contact))
        .route("/remove-contact", delete(remove_contact))
}

fn to_response(record: ContactRecord) -> ContactResponse {
    ContactResponse {
        id: record.id,
        name: record.name,
        phone: record.phone,
        user_id: record.user_id,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

/// Create a contact
///
/// POST /contacts/contact
async fn create_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateContactRequest>,
) -> ApiResult<(StatusCode, Json<ContactResponse>)> {
    let contact = ContactService::create(state.db(), auth.user_id, &req).await?;
    Ok((StatusCode::CREATED, Json(to_response(contact))))
}

/// List the caller's contacts
///
/// GET /contacts/get-contacts
async fn list_contacts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ContactListResponse>> {
    let contacts = ContactService::list(state.db(), auth.user_id).await?;
    Ok(Json(ContactListResponse {
        data: contacts.into_iter().map(to_response).collect(),
    }))
}

/// Get one contact
///
/// GET /contacts/get-contact?id=
async fn get_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ContactIdQuery>,
) -> ApiResult<Json<ContactResponse>> {
    let contact = ContactService::get(state.db(), auth.user_id, &query.id).await?;
    Ok(Json(to_response(contact)))
}

/// Edit a contact's name and phone
///
/// PUT /contacts/edit-contact
async fn edit_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<EditContactRequest>,
) -> ApiResult<Json<ContactResponse>> {
    let contact = ContactService::edit(state.db(), auth.user_id, &req).await?;
    Ok(Json(to_response(contact)))
}

/// Remove a contact
///
/// DELETE /contacts/remove-contact?id=
async fn remove_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ContactIdQuery>,
) -> ApiResult<Json<ContactResponse>> {
    let contact = ContactService::remove(state.db(), auth.user_id, &query.id).await?;
    Ok(Json(to_response(contact)))
}
