use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Agent,
    Admin,
    /// Platform operator. Sees every business, never moves money.
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Agent => "agent",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
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

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "agent" => Ok(Role::Agent),
            "admin" => Ok(Role::Admin),
            "super_admin" => Ok(Role::SuperAdmin),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown role '{}'",
                other
            )))),
        }
    }
}

/// Identity of the caller, resolved by the session layer and trusted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorContext {
    pub user_id: String,
    pub role: Role,
    /// Businesses the actor is a member of.
    pub business_ids: Vec<String>,
    pub active_business_id: Option<String>,
}

impl ActorContext {
    pub fn customer(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Customer,
            business_ids: Vec::new(),
            active_business_id: None,
        }
    }

    /// Staff member acting for a single business.
    pub fn staff(user_id: impl Into<String>, role: Role, business_id: impl Into<String>) -> Self {
        let business_id = business_id.into();
        Self {
            user_id: user_id.into(),
            role,
            business_ids: vec![business_id.clone()],
            active_business_id: Some(business_id),
        }
    }

    pub fn is_member_of(&self, business_id: &str) -> bool {
        self.business_ids.iter().any(|b| b == business_id)
    }
}
