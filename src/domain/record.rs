use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer gender, stored lowercase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    M,
    F,
}

impl Gender {
    /// Match an already trimmed and lowercased value
    pub fn from_normalized(s: &str) -> Option<Self> {
        match s {
            "m" => Some(Self::M),
            "f" => Some(Self::F),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::M => "m",
            Self::F => "f",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated sales record
///
/// `id` and `created_at` are only set on records read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    username: String,
    age: i64,
    height: i64,
    gender: Gender,
    amount: i64,
    last_purchase_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Create a record from already validated values
    pub fn new(
        username: impl Into<String>,
        age: i64,
        height: i64,
        gender: Gender,
        amount: i64,
        last_purchase_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            age,
            height,
            gender,
            amount,
            last_purchase_date,
            created_at: None,
        }
    }

    /// The same record as it exists once storage has assigned its identity
    pub fn persisted(self, id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Some(id),
            created_at: Some(created_at),
            ..self
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn last_purchase_date(&self) -> DateTime<Utc> {
        self.last_purchase_date
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn purchase() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 9, 21, 17, 9, 0).unwrap()
    }

    #[test]
    fn construct_with_mandatory_fields() {
        let r = Record::new("username", 18, 188, Gender::F, 150, purchase());

        assert_eq!(r.username(), "username");
        assert_eq!(r.age(), 18);
        assert_eq!(r.height(), 188);
        assert_eq!(r.gender(), Gender::F);
        assert_eq!(r.amount(), 150);
        assert_eq!(r.last_purchase_date(), purchase());
        assert_eq!(r.id(), None);
        assert_eq!(r.created_at(), None);
    }

    #[test]
    fn persisted_assigns_identity() {
        let created = Utc.with_ymd_and_hms(2021, 1, 2, 3, 4, 5).unwrap();
        let r = Record::new("username", 18, 188, Gender::F, 150, purchase()).persisted(7, created);

        assert_eq!(r.id(), Some(7));
        assert_eq!(r.created_at(), Some(created));
        assert_eq!(r.username(), "username");
    }

    #[test]
    fn serializes_with_column_names() {
        let created = Utc.with_ymd_and_hms(2021, 1, 2, 3, 4, 5).unwrap();
        let r = Record::new("Jane", 32, 187, Gender::F, 5342, purchase()).persisted(1, created);
        let value = serde_json::to_value(&r).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["username"], "Jane");
        assert_eq!(value["gender"], "f");
        assert_eq!(value["amount"], 5342);
        assert_eq!(value["last_purchase_date"], "2021-09-21T17:09:00Z");
        assert_eq!(value["created_at"], "2021-01-02T03:04:05Z");
    }

    #[test]
    fn gender_from_normalized() {
        assert_eq!(Gender::from_normalized("m"), Some(Gender::M));
        assert_eq!(Gender::from_normalized("f"), Some(Gender::F));
        assert_eq!(Gender::from_normalized("M"), None);
        assert_eq!(Gender::from_normalized("x"), None);
    }
}
