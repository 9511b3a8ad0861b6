use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Monotonic insertion epoch. Advances on every insert start and completion;
/// never reused within a session.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsertId(u64);

impl InsertId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for InsertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for InsertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a content node in the scenario. Negative ids coming from the
/// canvas mean "no node" and are filtered at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(pub u32);

impl ContentId {
    /// Accept a raw canvas id, treating negatives as absent.
    pub fn from_raw(raw: i64) -> Option<Self> {
        u32::try_from(raw).ok().map(ContentId)
    }
}

/// `deserialize_with` helper for optional ids sent by the canvas, where
/// `-1` and `null` both mean "no node".
pub fn optional_content_id<'de, D>(deserializer: D) -> Result<Option<ContentId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(ContentId::from_raw))
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_ids_advance() {
        let a = InsertId::default();
        assert!(a.next() > a);
        assert_eq!(a.next().get(), 1);
    }

    #[test]
    fn negative_content_ids_are_absent() {
        assert_eq!(ContentId::from_raw(-1), None);
        assert_eq!(ContentId::from_raw(3), Some(ContentId(3)));
    }

    #[derive(Deserialize)]
    struct Target {
        #[serde(default, deserialize_with = "optional_content_id")]
        id: Option<ContentId>,
    }

    #[test]
    fn canvas_ids_deserialize_leniently() {
        let parse = |json: &str| serde_json::from_str::<Target>(json).unwrap().id;
        assert_eq!(parse(r#"{"id":-1}"#), None);
        assert_eq!(parse(r#"{"id":null}"#), None);
        assert_eq!(parse("{}"), None);
        assert_eq!(parse(r#"{"id":7}"#), Some(ContentId(7)));
    }
}
