//! Customer identity and actor context

use serde::{Deserialize, Serialize};
use std::fmt;

/// Customer identity: a registered account or a session-scoped walk-in.
///
/// Orders, wait-list entries and reservations reference exactly one of the
/// two. Modeling this as a sum type makes the "both set" / "both null"
/// rows of the legacy schema unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerRef {
    Registered(String),
    Anonymous(String),
}

impl CustomerRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Registered(id) | Self::Anonymous(id) => id,
        }
    }

    /// Stable key for storage indices. The prefix keeps registered and
    /// anonymous id spaces disjoint even if raw ids collide.
    pub fn storage_key(&self) -> String {
        match self {
            Self::Registered(id) => format!("R:{}", id),
            Self::Anonymous(id) => format!("A:{}", id),
        }
    }
}

impl Default for CustomerRef {
    fn default() -> Self {
        Self::Anonymous(String::new())
    }
}

impl fmt::Display for CustomerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.storage_key())
    }
}

/// Staff roles, mirroring the user-directory profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    Owner,
    Supervisor,
    Waiter,
    Cook,
    Bartender,
}

/// Who is issuing an engine operation.
///
/// Passed explicitly in every command; the engine never consults an
/// ambient "current user".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorContext {
    Staff {
        id: String,
        name: String,
        role: StaffRole,
    },
    Customer {
        customer: CustomerRef,
        name: String,
    },
}

impl ActorContext {
    pub fn id(&self) -> &str {
        match self {
            Self::Staff { id, .. } => id,
            Self::Customer { customer, .. } => customer.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Staff { name, .. } | Self::Customer { name, .. } => name,
        }
    }

    pub fn staff_role(&self) -> Option<StaffRole> {
        match self {
            Self::Staff { role, .. } => Some(*role),
            Self::Customer { .. } => None,
        }
    }

    pub fn customer(&self) -> Option<&CustomerRef> {
        match self {
            Self::Customer { customer, .. } => Some(customer),
            Self::Staff { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_are_disjoint() {
        let registered = CustomerRef::Registered("42".to_string());
        let anonymous = CustomerRef::Anonymous("42".to_string());
        assert_ne!(registered.storage_key(), anonymous.storage_key());
        assert_eq!(registered.id(), anonymous.id());
    }

    #[test]
    fn customer_ref_serde_is_tagged() {
        let customer = CustomerRef::Anonymous("a-123".to_string());
        let json = serde_json::to_string(&customer).unwrap();
        assert!(json.contains("ANONYMOUS"));
        let back: CustomerRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, customer);
    }

    #[test]
    fn actor_accessors() {
        let staff = ActorContext::Staff {
            id: "m-1".to_string(),
            name: "Carla".to_string(),
            role: StaffRole::Waiter,
        };
        assert_eq!(staff.staff_role(), Some(StaffRole::Waiter));
        assert!(staff.customer().is_none());

        let customer = ActorContext::Customer {
            customer: CustomerRef::Registered("u-9".to_string()),
            name: "Diego".to_string(),
        };
        assert_eq!(customer.id(), "u-9");
        assert!(customer.staff_role().is_none());
    }
}
