//! Field-restricted permissions

use crate::types::{FieldName, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which fields of a partial update a role may submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedFields {
    /// Any field
    All,
    /// Only the listed fields
    Specific(BTreeSet<FieldName>),
}

impl AllowedFields {
    /// Returns true iff every requested field is allowed
    pub fn covers<'a, I>(&self, requested: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self {
            AllowedFields::All => true,
            AllowedFields::Specific(allowed) => {
                requested.into_iter().all(|field| allowed.contains(field))
            }
        }
    }
}

/// A role paired with the fields it may change
///
/// The role must be among the caller's applicable roles for the team. Since
/// Anonymous only applies to callers without any other role there, a
/// permission for it never reaches admins or team members.
///
/// # Example
///
/// ```
/// use catalog_authz::{Permission, Role};
///
/// let permission = Permission::fields(Role::TeamMember, ["po_name", "po_email"]);
/// assert!(permission.can_access_fields(["po_name"]));
/// assert!(!permission.can_access_fields(["po_name", "acronym"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub role: Role,
    pub allowed_fields: AllowedFields,
}

impl Permission {
    pub fn new(role: Role, allowed_fields: AllowedFields) -> Self {
        Self {
            role,
            allowed_fields,
        }
    }

    /// Permission for `role` to change any field
    pub fn all(role: Role) -> Self {
        Self::new(role, AllowedFields::All)
    }

    /// Permission for `role` to change only `fields`
    pub fn fields<I, S>(role: Role, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldName>,
    {
        Self::new(
            role,
            AllowedFields::Specific(fields.into_iter().map(Into::into).collect()),
        )
    }

    /// True iff the allowed fields are `All` or `requested` is a subset of them
    pub fn can_access_fields<'a, I>(&self, requested: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.allowed_fields.covers(requested)
    }
}
