//! App users.

use serde::Serialize;
use serde_json::Value;

use super::{Entity, join_display};
use crate::normalize::RawRecord;
use crate::query::Searchable;
use crate::types::{Timestamp, UserId, UserStatus};

/// Field spellings seen across API versions, highest priority first.
pub mod keys {
    pub const ID: &[&str] = &["UserID", "userId", "id"];
    pub const FIRST_NAME: &[&str] = &["FirstName", "firstName", "first_name"];
    pub const LAST_NAME: &[&str] = &["LastName", "lastName", "last_name"];
    pub const GENDER: &[&str] = &["Gender", "gender"];
    pub const STATUS: &[&str] = &["Status", "status", "IsActive", "isActive", "Active", "active"];
    pub const TYPE: &[&str] = &["Type", "type"];
    pub const CREATED: &[&str] = &["DateAdded", "dateAdded", "CreatedAt", "createdAt"];
    pub const UPDATED: &[&str] = &["DateUpdated", "dateUpdated", "UpdatedAt", "updatedAt"];
}

/// Canonical app user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// Falls back to `0` when the payload carries no usable id.
    pub id: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub status: UserStatus,
    pub account_type: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl User {
    /// `first last`, or `—` when both are missing.
    #[must_use]
    pub fn full_name(&self) -> String {
        join_display(&[self.first_name.as_deref(), self.last_name.as_deref()])
    }
}

impl Entity for User {
    type Id = UserId;
    const COLLECTION_KEY: &'static str = "Users";
    const KIND: &'static str = "user";

    fn normalize(raw: &Value) -> Self {
        let record = RawRecord::new(raw);
        Self {
            id: UserId::new(record.integer(keys::ID).unwrap_or_default()),
            first_name: record.text(keys::FIRST_NAME),
            last_name: record.text(keys::LAST_NAME),
            gender: record.text(keys::GENDER),
            status: record.get(keys::STATUS),
            account_type: record.text(keys::TYPE),
            created_at: record.date(keys::CREATED),
            updated_at: record.date(keys::UPDATED),
        }
    }

    fn id(&self) -> UserId {
        self.id
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.first_name.clone().unwrap_or_default(),
            self.last_name.clone().unwrap_or_default(),
            self.gender.clone().unwrap_or_default(),
            self.status.label().to_owned(),
            self.account_type.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_pascal_case() {
        let user = User::normalize(&json!({
            "UserID": 12,
            "FirstName": "Ayesha",
            "LastName": "Khan",
            "Gender": "Female",
            "Status": true,
            "Type": "Customer",
            "DateAdded": "2025-06-01T08:00:00Z",
            "DateUpdated": "not a date",
        }));
        assert_eq!(user.id, UserId::new(12));
        assert_eq!(user.full_name(), "Ayesha Khan");
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.account_type.as_deref(), Some("Customer"));
        assert!(user.created_at.is_some());
        assert!(user.updated_at.is_none());
    }

    #[test]
    fn test_normalize_alternate_spellings() {
        let user = User::normalize(&json!({
            "userId": "7",
            "first_name": "Bilal",
            "isActive": "blocked",
            "createdAt": "2025-01-01",
        }));
        assert_eq!(user.id, UserId::new(7));
        assert_eq!(user.full_name(), "Bilal");
        assert_eq!(user.status, UserStatus::Blocked);
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_not_active_reads_as_blocked() {
        let user = User::normalize(&json!({ "UserID": 9, "Status": "Not Active" }));
        assert_eq!(user.status, UserStatus::Blocked);
        assert!(user.status.is_blocked());
    }

    #[test]
    fn test_garbage_record_degrades() {
        let user = User::normalize(&json!("not an object"));
        assert_eq!(user.id, UserId::new(0));
        assert_eq!(user.full_name(), "—");
        assert_eq!(user.status, UserStatus::Unknown);
    }

    #[test]
    fn test_search_projection_uses_status_label() {
        let user = User::normalize(&json!({ "UserID": 3, "FirstName": "Sara", "Status": 0 }));
        assert!(user.matches_query("blocked"));
        assert!(user.matches_query("SARA"));
        assert!(!user.matches_query("active"));
    }
}
