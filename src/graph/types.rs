//! Core graph type definitions.
//!
//! Defines [`NodeId`], the five node kinds ([`NodeData`]), the four edge kinds
//! ([`EdgeKind`]), and the event attributes ([`Sentiment`], [`Severity`]) carried
//! by symptom logs.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::GraphError;

/// Opaque node identifier, assigned in creation order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discriminant of [`NodeData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Meal,
    Ingredient,
    Nutrient,
    UserLog,
    Symptom,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        Self::Meal,
        Self::Ingredient,
        Self::Nutrient,
        Self::UserLog,
        Self::Symptom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meal => "meal",
            Self::Ingredient => "ingredient",
            Self::Nutrient => "nutrient",
            Self::UserLog => "user_log",
            Self::Symptom => "symptom",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed edge kinds. Each kind connects exactly one pair of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    /// Meal → Ingredient.
    Contains,
    /// Ingredient → Nutrient.
    HasNutrient,
    /// UserLog → Symptom.
    Experienced,
    /// Meal → UserLog, when the log falls inside the correlation window after the meal.
    LoggedNear,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 4] = [
        Self::Contains,
        Self::HasNutrient,
        Self::Experienced,
        Self::LoggedNear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "CONTAINS",
            Self::HasNutrient => "HAS_NUTRIENT",
            Self::Experienced => "EXPERIENCED",
            Self::LoggedNear => "LOGGED_NEAR",
        }
    }

    /// The (source, target) node kinds this edge kind connects.
    pub fn endpoints(&self) -> (NodeKind, NodeKind) {
        match self {
            Self::Contains => (NodeKind::Meal, NodeKind::Ingredient),
            Self::HasNutrient => (NodeKind::Ingredient, NodeKind::Nutrient),
            Self::Experienced => (NodeKind::UserLog, NodeKind::Symptom),
            Self::LoggedNear => (NodeKind::Meal, NodeKind::UserLog),
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall feeling attached to a symptom log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            _ => Err(GraphError::invalid(format!("unknown sentiment: {s}"))),
        }
    }
}

/// Intensity of a logged feeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(GraphError::invalid(format!("unknown severity: {s}"))),
        }
    }
}

/// A single eating event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub timestamp: DateTime<Utc>,
    /// Reference to the meal photo (file name or URL), if one was uploaded.
    pub photo_ref: Option<String>,
}

/// A food item, shared across meals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// First-seen spelling; identity is by [`normalize_name`].
    pub name: String,
}

/// A nutritional property, shared across ingredients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    pub name: String,
}

/// One reported instance of a symptom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLog {
    pub timestamp: DateTime<Utc>,
    pub sentiment: Sentiment,
    pub severity: Option<Severity>,
    /// Display name of the symptom this log experienced.
    pub symptom: String,
}

/// A symptom category, shared across logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    pub name: String,
}

/// Kind-specific node attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeData {
    Meal(Meal),
    Ingredient(Ingredient),
    Nutrient(Nutrient),
    UserLog(UserLog),
    Symptom(Symptom),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Meal(_) => NodeKind::Meal,
            Self::Ingredient(_) => NodeKind::Ingredient,
            Self::Nutrient(_) => NodeKind::Nutrient,
            Self::UserLog(_) => NodeKind::UserLog,
            Self::Symptom(_) => NodeKind::Symptom,
        }
    }

    /// Display name for the deduplicated kinds, `None` for events.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Ingredient(i) => Some(&i.name),
            Self::Nutrient(n) => Some(&n.name),
            Self::Symptom(s) => Some(&s.name),
            Self::Meal(_) | Self::UserLog(_) => None,
        }
    }

    /// Event time for meals and logs, `None` otherwise.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Meal(m) => Some(m.timestamp),
            Self::UserLog(l) => Some(l.timestamp),
            _ => None,
        }
    }
}

/// A node as exported: id, kind tag, and attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(flatten)]
    pub data: NodeData,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}

/// A directed, typed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
}

/// Deduplication key for ingredient, nutrient, and symptom names.
///
/// Trims, collapses internal whitespace runs to a single space, and lowercases.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Display form of a name: trimmed with whitespace collapsed, case preserved.
pub(crate) fn display_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse an event timestamp from untrusted text.
///
/// Accepts RFC 3339 (`2025-10-04T12:00:00Z`, `2025-10-04T12:00:00+02:00`) or a naive
/// ISO 8601 date-time (`2025-10-04T12:00:00`, optional fractional seconds), which is
/// taken as UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, GraphError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(GraphError::invalid("timestamp must not be empty"));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| GraphError::invalid(format!("malformed timestamp: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn normalize_trims_and_folds_case() {
        assert_eq!(normalize_name("  Avocado "), "avocado");
        assert_eq!(normalize_name("Cherry   Tomatoes"), "cherry tomatoes");
        assert_eq!(normalize_name("HIGH\tEnergy"), "high energy");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn display_name_keeps_case() {
        assert_eq!(display_name("  High   Energy "), "High Energy");
    }

    #[test]
    fn parse_timestamp_accepts_rfc3339_and_naive() {
        let expected = Utc.with_ymd_and_hms(2025, 10, 4, 12, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-10-04T12:00:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-10-04T12:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-10-04T14:00:00+02:00").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2025-10-04T12:00:00.250").unwrap(),
            expected + chrono::TimeDelta::milliseconds(250)
        );
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert!(matches!(parse_timestamp(""), Err(GraphError::InvalidInput(_))));
        assert!(matches!(parse_timestamp("yesterday"), Err(GraphError::InvalidInput(_))));
        assert!(matches!(parse_timestamp("2025-13-40T99:00:00"), Err(GraphError::InvalidInput(_))));
    }

    #[test]
    fn sentiment_and_severity_parse_case_insensitively() {
        assert_eq!(" Positive".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
        assert!("ecstatic".parse::<Sentiment>().is_err());
        assert!("-3".parse::<Severity>().is_err());
    }

    #[test]
    fn edge_kind_endpoints_match_schema() {
        assert_eq!(EdgeKind::Contains.endpoints(), (NodeKind::Meal, NodeKind::Ingredient));
        assert_eq!(EdgeKind::LoggedNear.endpoints(), (NodeKind::Meal, NodeKind::UserLog));
        for kind in EdgeKind::ALL {
            let (from, to) = kind.endpoints();
            assert_ne!(from, to, "{kind} must not connect a kind to itself");
        }
    }

    #[test]
    fn node_serializes_with_kind_tag() {
        let node = Node {
            id: NodeId(7),
            data: NodeData::Symptom(Symptom { name: "Headache".into() }),
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["kind"], "symptom");
        assert_eq!(json["name"], "Headache");
    }
}
