//! Roles and the controls they unlock.
//!
//! The board runs under one role at a time; the toggle flips between them.
//! A parent manages the board (add, delete); completing a task is open to
//! both roles so a child can mark their own chore done.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    #[default]
    Child,
}

impl Role {
    pub fn can_add(self) -> bool {
        matches!(self, Role::Parent)
    }

    pub fn can_delete(self) -> bool {
        matches!(self, Role::Parent)
    }

    pub fn can_complete(self) -> bool {
        true
    }

    pub fn toggled(self) -> Role {
        match self {
            Role::Parent => Role::Child,
            Role::Child => Role::Parent,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Parent => "parent",
            Role::Child => "child",
        }
    }

    /// Error for an action this role does not unlock.
    pub fn denied(self, action: &str) -> Error {
        Error::RoleDenied {
            role: self.as_str().to_string(),
            action: action.to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "parent" => Ok(Role::Parent),
            "child" => Ok(Role::Child),
            other => Err(Error::InvalidArgument(format!(
                "unknown role '{other}' (expected parent|child)"
            ))),
        }
    }
}
