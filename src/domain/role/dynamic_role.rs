use serde::Serialize;

use crate::domain::foundation::{DynamicRoleId, RoleId, Timestamp, UserId};

use super::errors::RoleError;

/// Longest dynamic role type label accepted.
const MAX_TYPE_LEN: usize = 50;

/// A platform role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: RoleId,
    pub title: String,
    pub description: Option<String>,
}

/// Mapping from a dynamic role type to a platform role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicRole {
    pub id: DynamicRoleId,
    pub role_type: String,
    pub role_id: RoleId,
    pub created_by: UserId,
    pub created_at: Timestamp,
    pub updated_by: UserId,
    pub updated_at: Timestamp,
}

impl DynamicRole {
    /// Creates a new mapping owned by `actor`.
    ///
    /// # Errors
    ///
    /// `Validation` if the type is blank or too long.
    pub fn create(
        role_type: impl Into<String>,
        role_id: RoleId,
        actor: UserId,
        now: Timestamp,
    ) -> Result<Self, RoleError> {
        let role_type = role_type.into().trim().to_string();
        if role_type.is_empty() {
            return Err(RoleError::validation("type", "This field may not be blank."));
        }
        if role_type.chars().count() > MAX_TYPE_LEN {
            return Err(RoleError::validation(
                "type",
                format!("Ensure this field has no more than {} characters.", MAX_TYPE_LEN),
            ));
        }
        Ok(Self {
            id: DynamicRoleId::new(),
            role_type,
            role_id,
            created_by: actor.clone(),
            created_at: now,
            updated_by: actor,
            updated_at: now,
        })
    }

    /// Points the mapping at another role.
    pub fn reassign(&mut self, role_id: RoleId, actor: UserId, now: Timestamp) {
        self.role_id = role_id;
        self.updated_by = actor;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> UserId {
        UserId::new("admin").unwrap()
    }

    #[test]
    fn create_trims_type_and_stamps_audit_fields() {
        let now = Timestamp::now();
        let role = DynamicRole::create(" lead ", RoleId::new("r-1").unwrap(), actor(), now).unwrap();
        assert_eq!(role.role_type, "lead");
        assert_eq!(role.created_by, actor());
        assert_eq!(role.updated_at, now);
    }

    #[test]
    fn create_rejects_blank_type() {
        let result = DynamicRole::create("  ", RoleId::new("r-1").unwrap(), actor(), Timestamp::now());
        assert!(matches!(result, Err(RoleError::Validation { .. })));
    }

    #[test]
    fn reassign_updates_role_and_audit() {
        let created = Timestamp::from_unix_secs(1_000);
        let mut role = DynamicRole::create("lead", RoleId::new("r-1").unwrap(), actor(), created).unwrap();
        let editor = UserId::new("editor").unwrap();
        let later = created.plus_secs(60);

        role.reassign(RoleId::new("r-2").unwrap(), editor.clone(), later);

        assert_eq!(role.role_id.as_str(), "r-2");
        assert_eq!(role.updated_by, editor);
        assert_eq!(role.updated_at, later);
        assert_eq!(role.created_at, created);
    }
}
