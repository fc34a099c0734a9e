//! Environment type and default selection

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::id::generate_id;

/// Variables keyed by name. Sorted so persisted files are stable.
pub type VariableMap = BTreeMap<String, String>;

/// A named set of variables owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Unique identifier, time-ordered
    pub id: Uuid,
    /// Owning user
    pub owner_id: String,
    /// Environment name (e.g., "Development", "Production")
    pub name: String,
    /// Variables available to `{{name}}` tokens
    #[serde(default)]
    pub variables: VariableMap,
    /// Whether this is the owner's default environment
    #[serde(default)]
    pub is_default: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Environment {
    /// Creates an empty, non-default environment.
    #[must_use]
    pub fn new(owner_id: impl Into<String>, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            owner_id: owner_id.into(),
            name: name.into(),
            variables: VariableMap::new(),
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Adds a variable, builder style.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_variable(name, value);
        self
    }

    /// Marks this environment as the default, builder style.
    #[must_use]
    pub const fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Adds or replaces a variable.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Looks up a variable value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Returns true if `owner_id` owns this environment.
    #[must_use]
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }

    /// Checks the name and every variable name.
    ///
    /// # Errors
    ///
    /// Returns `MissingName` for a blank name, or `InvalidVariableName` for
    /// the first variable that could never be referenced by a token.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingName);
        }
        if let Some(bad) = self.variables.keys().find(|k| !is_valid_variable_name(k)) {
            return Err(DomainError::InvalidVariableName(bad.clone()));
        }
        Ok(())
    }
}

/// Returns true if `name` can appear inside a `{{name}}` token:
/// one or more ASCII letters, digits or underscores.
#[must_use]
pub fn is_valid_variable_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Picks the environment a user starts with: the flagged default, else the
/// first in listing order, else none.
#[must_use]
pub fn select_active(environments: &[Environment]) -> Option<&Environment> {
    environments
        .iter()
        .find(|e| e.is_default)
        .or_else(|| environments.first())
}
