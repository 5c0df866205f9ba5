//! Contact service: the five address-book operations
//!
//! Every operation takes the authenticated caller's user ID and only ever
//! touches rows owned by it. A contact that exists but belongs to someone
//! else is reported exactly like one that does not exist.

use crate::error::ApiError;
use crate::repositories::{ContactRecord, ContactRepository, CreateContact, UserRepository};
use contact_keeper_shared::types::{CreateContactRequest, EditContactRequest};
use contact_keeper_shared::validation;
use sqlx::PgPool;
use uuid::Uuid;

const CONTACT_NOT_FOUND: &str = "Contact not found";
const PHONE_TAKEN: &str = "Phone number already exists";

/// Parse an ID that the contract requires to be present (edit, remove):
/// a missing ID is a validation failure, a malformed one cannot match any
/// record and is reported as not found.
fn parse_required_id(id: &Option<String>) -> Result<Uuid, ApiError> {
    let raw = validation::required(id, "id").map_err(ApiError::Validation)?;
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(CONTACT_NOT_FOUND.to_string()))
}

/// Parse an ID for lookups (get): absence and malformation both resolve to
/// "no such contact".
fn parse_lookup_id(id: &Option<String>) -> Result<Uuid, ApiError> {
    id.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ApiError::NotFound(CONTACT_NOT_FOUND.to_string()))
}

/// Contact service for address-book operations
pub struct ContactService;

impl ContactService {
    /// Create a contact for the caller and record the back-reference
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        req: &CreateContactRequest,
    ) -> Result<ContactRecord, ApiError> {
        let name = validation::required(&req.name, "name")
            .and_then(|n| validation::validate_contact_name(n).map(|_| n))
            .map_err(ApiError::Validation)?;
        let phone = validation::required(&req.phone, "phone")
            .and_then(|p| validation::validate_phone(p).map(|_| p))
            .map_err(ApiError::Validation)?;

        // Fast-path check for a friendlier message; the (user_id, phone)
        // unique index still catches the check-then-insert race and maps
        // to the same 409.
        if ContactRepository::phone_exists(pool, user_id, phone, None)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict(PHONE_TAKEN.to_string()));
        }

        let contact = ContactRepository::create(
            pool,
            CreateContact {
                user_id,
                name: name.to_string(),
                phone: phone.to_string(),
            },
        )
        .await?;

        UserRepository::append_contact(pool, user_id, contact.id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(contact)
    }

    /// List all contacts owned by the caller
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<ContactRecord>, ApiError> {
        ContactRepository::list_by_owner(pool, user_id)
            .await
            .map_err(ApiError::Internal)
    }

    /// Get one contact owned by the caller
    pub async fn get(
        pool: &PgPool,
        user_id: Uuid,
        id: &Option<String>,
    ) -> Result<ContactRecord, ApiError> {
        let id = parse_lookup_id(id)?;

        ContactRepository::find_by_id_and_owner(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(CONTACT_NOT_FOUND.to_string()))
    }

    /// Edit name and phone of an owned contact
    pub async fn edit(
        pool: &PgPool,
        user_id: Uuid,
        req: &EditContactRequest,
    ) -> Result<ContactRecord, ApiError> {
        let id = parse_required_id(&req.id)?;
        let name = validation::required(&req.name, "name")
            .and_then(|n| validation::validate_contact_name(n).map(|_| n))
            .map_err(ApiError::Validation)?;
        let phone = validation::required(&req.phone, "phone")
            .and_then(|p| validation::validate_phone(p).map(|_| p))
            .map_err(ApiError::Validation)?;

        // Ownership check before the conflict check so a foreign contact
        // is indistinguishable from a missing one
        ContactRepository::find_by_id_and_owner(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(CONTACT_NOT_FOUND.to_string()))?;

        // Keeping the same phone on the record being edited is allowed
        if ContactRepository::phone_exists(pool, user_id, phone, Some(id))
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict(PHONE_TAKEN.to_string()));
        }

        ContactRepository::update(pool, id, user_id, name, phone)
            .await?
            .ok_or_else(|| ApiError::NotFound(CONTACT_NOT_FOUND.to_string()))
    }

    /// Remove an owned contact and retract the back-reference
    pub async fn remove(
        pool: &PgPool,
        user_id: Uuid,
        id: &Option<String>,
    ) -> Result<ContactRecord, ApiError> {
        let id = parse_required_id(id)?;

        let contact = ContactRepository::delete(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(CONTACT_NOT_FOUND.to_string()))?;

        // Not transactional: a crash here leaves a dangling id in
        // contact_ids. The contact row's user_id is authoritative, so the
        // stale reference is inert; accepted gap.
        UserRepository::remove_contact(pool, user_id, contact.id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(contact)
    }
}
