//! Student record as stored in the `student` table and exchanged as JSON.

use serde::{Deserialize, Deserializer, Serialize};

/// A student row. `id == 0` means the store has not assigned one yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    #[serde(default, deserialize_with = "null_as_unassigned")]
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Absent and `null` ids both mean "let the store assign one".
fn null_as_unassigned<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or(0))
}

impl Student {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Student {
            id: 0,
            name: Some(name.into()),
            address: Some(address.into()),
        }
    }

    pub fn is_unassigned(&self) -> bool {
        self.id == 0
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_unassigned() {
        let s: Student = serde_json::from_str(r#"{"name":"Alice"}"#).unwrap();
        assert!(s.is_unassigned());
        assert!(s.has_name("Alice"));
        assert_eq!(s.address, None);
    }

    #[test]
    fn null_fields_are_accepted() {
        let s: Student = serde_json::from_str(r#"{"id":null,"name":null,"address":"1 Main St"}"#).unwrap();
        assert!(s.is_unassigned());
        assert_eq!(s.name, None);
        assert_eq!(s.address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn serializes_all_three_fields() {
        let s = Student {
            id: 3,
            name: Some("Bob".into()),
            address: Some("2 High St".into()),
        };
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v, serde_json::json!({"id": 3, "name": "Bob", "address": "2 High St"}));
    }
}
