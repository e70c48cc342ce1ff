//! User record definitions

use serde::{Deserialize, Serialize};

/// A user held in the local catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Source-assigned identifier
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Social security number, may contain `-` separators
    pub ssn: String,
    pub email: String,
    pub age: i32,
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl User {
    /// Create a user with the required fields set
    pub fn new(
        id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        ssn: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            ssn: ssn.into(),
            email: email.into(),
            age: 0,
            role: "user".to_string(),
            phone: None,
            username: None,
            birth_date: None,
            gender: None,
        }
    }

    /// "firstName lastName"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// "lastName firstName"
    pub fn reversed_full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// A user as delivered by the external source.
///
/// Unknown fields (address, bank, company, ...) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub ssn: String,
    pub email: String,
    pub age: i32,
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl From<SourceUser> for User {
    fn from(source: SourceUser) -> Self {
        Self {
            id: source.id,
            first_name: source.first_name,
            last_name: source.last_name,
            ssn: source.ssn,
            email: source.email,
            age: source.age,
            role: source.role,
            phone: source.phone,
            username: source.username,
            birth_date: source.birth_date,
            gender: source.gender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_user_ignores_unknown_fields() {
        let json = r#"{
            "id": 1,
            "firstName": "Emily",
            "lastName": "Johnson",
            "maidenName": "Smith",
            "age": 28,
            "gender": "female",
            "email": "emily.johnson@x.dummyjson.com",
            "phone": "+81 965-431-3024",
            "username": "emilys",
            "birthDate": "1996-5-30",
            "ssn": "900-590-289",
            "role": "admin",
            "address": { "city": "Phoenix" }
        }"#;

        let source: SourceUser = serde_json::from_str(json).unwrap();
        let user = User::from(source);

        assert_eq!(user.id, 1);
        assert_eq!(user.first_name, "Emily");
        assert_eq!(user.ssn, "900-590-289");
        assert_eq!(user.birth_date.as_deref(), Some("1996-5-30"));
        assert_eq!(user.role, "admin");
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User::new(7, "John", "Doe", "123-45-6789", "john@example.com");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["lastName"], "Doe");
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn test_name_concatenations() {
        let user = User::new(1, "John", "Doe", "1", "j@d.com");
        assert_eq!(user.full_name(), "John Doe");
        assert_eq!(user.reversed_full_name(), "Doe John");
    }
}
