//! Core protocol types for the back-office wire format.
//!
//! Every type in this module is a JSON body exchanged with the REST API.
//! Field names follow the backend's camelCase convention through serde
//! attributes so the Rust side can keep snake_case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// An opaque bearer token issued by `POST /login`.
///
/// Newtype wrapper around the raw string. The `Debug` impl is written by
/// hand so a credential never shows up in logs or panic messages, and the
/// inner value is only reachable through [`Credential::as_str`].
///
/// `#[serde(transparent)]` keeps the JSON representation a bare string.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token, for building the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the token is empty or whitespace only.
    ///
    /// An empty credential never counts as authenticated.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// The role tag attached to a session.
///
/// Written as a lowercase string (`"admin"`, `"cashier"`, ...). Incoming
/// tags go through [`FromStr`], so the backend's `"User"` and a stored
/// `"user"` decode the same way. It is parsed into a closed set here so
/// every permission check downstream is an exact match on a variant, never
/// a substring test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Role {
    Admin,
    Manager,
    Store,
    Cashier,
    User,
}

impl Role {
    /// All roles, in privilege order (most privileged first).
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Manager,
        Role::Store,
        Role::Cashier,
        Role::User,
    ];

    /// The wire tag for this role, as stored and as sent by the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Store => "store",
            Self::Cashier => "cashier",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a stored or user-supplied role tag.
///
/// Surrounding whitespace and ASCII case are ignored; anything else must
/// match a tag exactly.
impl FromStr for Role {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ProtocolError::UnknownRole(s.to_string()))
    }
}

impl TryFrom<String> for Role {
    type Error = ProtocolError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Body of `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful body of `POST /login`.
///
/// ```json
/// { "jwtToken": "eyJhbGciOi...", "usertype": "manager" }
/// ```
///
/// A `usertype` this client does not recognise decodes as `None`: the
/// login still succeeded, the session just carries no role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "jwtToken")]
    pub credential: Credential,
    #[serde(
        rename = "usertype",
        default,
        deserialize_with = "lenient_role",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<Role>,
}

fn lenient_role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Role>, D::Error> {
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(tag.and_then(|tag| tag.parse().ok()))
}

/// The `{ "message": "..." }` body the backend attaches to error
/// responses. Every field is optional because not every error has one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

/// A sellable item. The backend calls these "items" in its paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
}

/// Body of `POST /items` and `PUT /items/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: i64,
}

/// A stock row: one product and its quantity on hand (`qoh`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub id: i64,
    pub item: Product,
    pub qoh: i64,
}

/// A quantity adjustment. `id` is a stock id for batch adjustments and
/// a product id when creating a stock row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDto {
    pub id: i64,
    pub qty: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    /// ISO-8601 timestamp as sent by the backend.
    pub order_date_time: String,
    pub order_total: f64,
    pub items: Vec<Product>,
}

/// Body of `POST /orders`. Each product id appears once per unit sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub item_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub fullname: String,
    pub user_type: Role,
}

/// Body of `POST /users` and `PUT /users/{id}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    pub username: String,
    pub password: String,
    pub fullname: String,
    pub user_type: Role,
}

impl fmt::Debug for UserForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserForm")
            .field("username", &self.username)
            .field("fullname", &self.fullname)
            .field("user_type", &self.user_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // Role
    // =====================================================================

    #[test]
    fn test_role_from_str_known_tags_parse() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_from_str_ignores_case_and_whitespace() {
        assert_eq!(" Cashier ".parse::<Role>().unwrap(), Role::Cashier);
    }

    #[test]
    fn test_role_from_str_substring_is_rejected() {
        // "superuser" contains "user" but is not the user role.
        let result = "superuser".parse::<Role>();

        assert!(matches!(result, Err(ProtocolError::UnknownRole(tag)) if tag == "superuser"));
    }

    #[test]
    fn test_role_from_str_misspelled_tag_is_rejected() {
        assert!("chashier".parse::<Role>().is_err());
    }

    // =====================================================================
    // Credential
    // =====================================================================

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("secret-token");

        let printed = format!("{credential:?}");

        assert!(!printed.contains("secret-token"));
    }

    #[test]
    fn test_credential_whitespace_is_empty() {
        assert!(Credential::new("  ").is_empty());
        assert!(!Credential::new("abc").is_empty());
    }

    // =====================================================================
    // Wire shapes
    // =====================================================================

    #[test]
    fn test_login_response_uses_backend_field_names() {
        let json = r#"{"jwtToken":"abc","usertype":"store"}"#;

        let response: LoginResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.credential.as_str(), "abc");
        assert_eq!(response.role, Some(Role::Store));
    }

    #[test]
    fn test_login_response_unknown_role_decodes_without_role() {
        let json = r#"{"jwtToken":"abc","usertype":"superuser"}"#;

        let response: LoginResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.credential.as_str(), "abc");
        assert_eq!(response.role, None);
    }

    #[test]
    fn test_login_response_missing_role_decodes_without_role() {
        let response: LoginResponse = serde_json::from_str(r#"{"jwtToken":"abc"}"#).unwrap();

        assert_eq!(response.role, None);
    }

    #[test]
    fn test_login_response_capitalised_role_decodes() {
        let json = r#"{"jwtToken":"abc","usertype":"User"}"#;

        let response: LoginResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.role, Some(Role::User));
    }

    #[test]
    fn test_role_deserialize_matches_from_str() {
        for tag in ["User", "ADMIN", " cashier ", "manager"] {
            let decoded: Role = serde_json::from_value(serde_json::json!(tag)).unwrap();

            assert_eq!(decoded, tag.parse::<Role>().unwrap(), "{tag}");
        }
        assert!(serde_json::from_str::<Role>(r#""superuser""#).is_err());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Cashier).unwrap(), r#""cashier""#);
    }

    #[test]
    fn test_user_list_with_capitalised_role_decodes() {
        let json = r#"[
            {"id":1,"username":"amal","fullname":"Amal Perera","userType":"admin"},
            {"id":2,"username":"nimal","fullname":"Nimal Silva","userType":"User"}
        ]"#;

        let users: Vec<User> = serde_json::from_str(json).unwrap();

        assert_eq!(users[1].user_type, Role::User);
    }

    #[test]
    fn test_product_form_serializes_camel_case() {
        let form = ProductForm {
            name: "Tea".into(),
            description: "Ceylon".into(),
            price: 450.0,
            category_id: 3,
        };

        let value = serde_json::to_value(&form).unwrap();

        assert_eq!(value["categoryId"], 3);
    }

    #[test]
    fn test_user_form_debug_hides_password() {
        let form = UserForm {
            username: "nimal".into(),
            password: "hunter2".into(),
            fullname: "Nimal Perera".into(),
            user_type: Role::Cashier,
        };

        assert!(!format!("{form:?}").contains("hunter2"));
    }

    #[test]
    fn test_api_message_missing_field_defaults_to_none() {
        let body: ApiMessage = serde_json::from_str("{}").unwrap();

        assert_eq!(body.message, None);
    }
}
