//! Task status values.
//!
//! The update path accepts any status string, so `TaskStatus` is an open set:
//! the four values the UI offers are named variants and anything else is kept
//! verbatim in [`TaskStatus::Other`]. No transition graph is enforced.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Status of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    /// Initial state of every new task.
    #[default]
    Assigned,
    InProgress,
    Review,
    Completed,
    /// Any value outside the known set, preserved as submitted.
    Other(String),
}

impl TaskStatus {
    /// The statuses offered by the UI, in workflow order.
    pub const KNOWN: [Self; 4] = [
        Self::Assigned,
        Self::InProgress,
        Self::Review,
        Self::Completed,
    ];

    /// Parse a status string. Never fails.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "assigned" => Self::Assigned,
            "in_progress" => Self::InProgress,
            "review" => Self::Review,
            "completed" => Self::Completed,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The stored representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Completed => "completed",
            Self::Other(s) => s,
        }
    }

    /// Human readable label, e.g. `in_progress` -> `In Progress`.
    #[must_use]
    pub fn label(&self) -> Cow<'_, str> {
        match self {
            Self::Assigned => Cow::Borrowed("Assigned"),
            Self::InProgress => Cow::Borrowed("In Progress"),
            Self::Review => Cow::Borrowed("Review"),
            Self::Completed => Cow::Borrowed("Completed"),
            Self::Other(s) => Cow::Owned(titlecase(s)),
        }
    }

    /// Whether the status is one of the four known values.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

fn titlecase(s: &str) -> String {
    s.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TaskStatus {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s))
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for TaskStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for TaskStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::parse(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for TaskStatus {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}
