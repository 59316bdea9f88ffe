//! The claims carried inside a credential, and the roles derived from them.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Prefix the server puts in front of every role authority.
pub const ROLE_PREFIX: &str = "ROLE_";

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The three roles a Ledgerly user can hold.
///
/// The set is closed: an authority naming anything else maps to "no role"
/// rather than to an error or a catch-all variant.
///
/// `#[serde(rename_all = "UPPERCASE")]` keeps the wire names the server
/// and route configuration use: `"ADMIN"`, `"OWNER"`, `"STAFF"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Platform administrator. Manages owners and other admins.
    Admin,
    /// Business owner. Manages shops, staff, purchases and payments.
    Owner,
    /// Shop staff. Works with customers and ledger entries.
    Staff,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Owner, Role::Staff];

    /// The wire name: `"ADMIN"`, `"OWNER"` or `"STAFF"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Owner => "OWNER",
            Role::Staff => "STAFF",
        }
    }

    /// Parses an exact wire name. Matching is case-sensitive: `"owner"` is
    /// not a role.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == s)
    }

    /// The authority string the server embeds for this role, e.g.
    /// `ROLE_OWNER`.
    pub fn authority(&self) -> String {
        format!("{ROLE_PREFIX}{}", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

/// The facts asserted by a credential's payload segment.
///
/// ```json
/// {
///   "sub": "owner@example.com",
///   "authorities": ["ROLE_OWNER"],
///   "iat": 1700000000,
///   "exp": 1700086400
/// }
/// ```
///
/// Claims are derived from the credential every time they're needed and
/// never stored on their own. Only `exp` is mandatory; a token without a
/// numeric expiry can't be judged fresh and fails to decode.
///
/// Everything else is read leniently. A `sub` that isn't a string, an
/// `iat` that isn't a number, or `authorities` in an unexpected shape
/// (`null`, `[{"authority": "ROLE_ADMIN"}]`) never fails the decode; at
/// worst the credential carries no role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Who the credential was issued to.
    #[serde(default, deserialize_with = "lenient_string")]
    pub sub: String,

    /// Raw role strings such as `"ROLE_ADMIN"`. Only the first one is used.
    /// Entries that aren't strings are kept as empty strings so they still
    /// occupy their position.
    #[serde(default, deserialize_with = "lenient_authorities")]
    pub authorities: Vec<String>,

    /// Issued at, epoch seconds.
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub iat: u64,

    /// Expires at, epoch seconds. The credential is invalid from this
    /// instant onwards. Fractional values round up, negative ones to zero.
    #[serde(deserialize_with = "required_seconds")]
    pub exp: u64,
}

impl Claims {
    /// Claims for `sub` holding a single `role`, valid over `[iat, exp)`.
    pub fn for_role(sub: impl Into<String>, role: Role, iat: u64, exp: u64) -> Self {
        Self {
            sub: sub.into(),
            authorities: vec![role.authority()],
            iat,
            exp,
        }
    }
}

// -- Lenient claim readers --------------------------------------------------

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_authorities<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                _ => String::new(),
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Whole epoch seconds from any JSON number.
fn epoch_seconds(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().map(|secs| secs.max(0.0).ceil() as u64))
}

fn lenient_seconds<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(epoch_seconds(&Value::deserialize(d)?).unwrap_or(0))
}

fn required_seconds<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(d)?;
    epoch_seconds(&value).ok_or_else(|| D::Error::custom(format!("exp is not a number: {value}")))
}

/// Derives the role carried by `claims`.
///
/// Takes the **first** authority, strips [`ROLE_PREFIX`] and maps the rest
/// onto [`Role`]. Returns `None`, never an error, when:
/// - there are no authorities,
/// - the first authority lacks the prefix (`"OWNER"`),
/// - the remainder isn't a known role (`"ROLE_AUDITOR"`).
pub fn role_from_claims(claims: &Claims) -> Option<Role> {
    claims
        .authorities
        .first()
        .and_then(|authority| authority.strip_prefix(ROLE_PREFIX))
        .and_then(Role::parse)
}
