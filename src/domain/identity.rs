use serde::{Deserialize, Serialize};

/// The two roles an authenticated caller can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Only administrators may move an import through its shipping states.
    pub fn can_update_status(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Administrators see every import; everyone else only their own.
    pub fn sees_all_imports(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// The authenticated caller on whose behalf an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i32,
    pub role: Role,
}

impl Actor {
    pub fn new(id: i32, role: Role) -> Self {
        Self { id, role }
    }

    /// Owner filter to apply to reads, `None` when the caller sees everything.
    pub fn owner_scope(&self) -> Option<i32> {
        if self.role.sees_all_imports() {
            None
        } else {
            Some(self.id)
        }
    }
}
