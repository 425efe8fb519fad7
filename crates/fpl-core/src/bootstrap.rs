// Raw bootstrap document: the five collections the dashboard reads and the
// serde shapes of their records.
//
// Nothing here interprets values; numeric-as-text fields are kept as
// `NumericText` and coerced by the normalizer.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Top-level keys that must be present in the bootstrap payload.
pub const REQUIRED_COLLECTIONS: [&str; 5] =
    ["elements", "element_types", "teams", "phases", "events"];

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// The payload does not have the shape the dashboard depends on.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("bootstrap document is not a JSON object")]
    NotAnObject,

    #[error("bootstrap document has no `{0}` collection")]
    MissingCollection(&'static str),

    #[error("`{0}` collection is not an array")]
    NotAnArray(&'static str),

    #[error("{collection}[{index}]: {source}")]
    Record {
        collection: &'static str,
        index: usize,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Record shapes
// ---------------------------------------------------------------------------

/// A field that the API sometimes serializes as a number and sometimes as
/// numeric text (e.g. `"selected_by_percent": "31.4"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericText {
    Number(f64),
    Text(String),
}

/// One entry of `elements`: the fixed field list the dashboard selects.
///
/// Every field is required. The three set-piece order fields must be present
/// but may be `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawElement {
    pub id: u32,
    pub first_name: String,
    pub web_name: String,
    pub team: u32,
    pub element_type: u32,
    pub selected_by_percent: NumericText,
    pub now_cost: i64,
    pub minutes: i64,
    pub transfers_in: i64,
    pub transfers_out: i64,
    pub bonus: i64,
    pub goals_scored: i64,
    pub goals_conceded: i64,
    pub assists: i64,
    pub clean_sheets: i64,
    pub saves: i64,
    pub bps: i64,
    pub influence: NumericText,
    pub creativity: NumericText,
    pub threat: NumericText,
    pub ict_index: NumericText,
    pub own_goals: i64,
    pub penalties_saved: i64,
    #[serde(deserialize_with = "present_but_nullable")]
    pub direct_freekicks_order: Option<u32>,
    #[serde(deserialize_with = "present_but_nullable")]
    pub corners_and_indirect_freekicks_order: Option<u32>,
    #[serde(deserialize_with = "present_but_nullable")]
    pub penalties_order: Option<u32>,
    pub penalties_missed: i64,
    pub value_season: NumericText,
    pub points_per_game: NumericText,
    pub total_points: i64,
}

/// One entry of `element_types` (Goalkeeper, Defender, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct RawElementType {
    pub id: u32,
    pub singular_name: String,
}

/// One entry of `teams`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTeam {
    pub id: u32,
    pub name: String,
}

/// Using `deserialize_with` makes serde treat the field as required even
/// though the target is an `Option`.
fn present_but_nullable<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u32>::deserialize(deserializer)
}

// ---------------------------------------------------------------------------
// BootstrapDocument
// ---------------------------------------------------------------------------

/// The collections extracted from one bootstrap payload.
#[derive(Debug, Clone)]
pub struct BootstrapDocument {
    pub elements: Vec<RawElement>,
    pub element_types: Vec<RawElementType>,
    pub teams: Vec<RawTeam>,
    /// Validated as present; not used downstream.
    pub phase_count: usize,
    /// Validated as present; not used downstream.
    pub event_count: usize,
}

impl BootstrapDocument {
    /// Extract and type-check all collections from a parsed payload.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let root = value.as_object().ok_or(SchemaError::NotAnObject)?;

        for key in REQUIRED_COLLECTIONS {
            collection(root, key)?;
        }

        Ok(BootstrapDocument {
            elements: records(root, "elements")?,
            element_types: records(root, "element_types")?,
            teams: records(root, "teams")?,
            phase_count: collection(root, "phases")?.len(),
            event_count: collection(root, "events")?.len(),
        })
    }
}

fn collection<'a>(
    root: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a Vec<Value>, SchemaError> {
    root.get(key)
        .ok_or(SchemaError::MissingCollection(key))?
        .as_array()
        .ok_or(SchemaError::NotAnArray(key))
}

fn records<T>(root: &Map<String, Value>, key: &'static str) -> Result<Vec<T>, SchemaError>
where
    T: for<'de> Deserialize<'de>,
{
    collection(root, key)?
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            T::deserialize(raw).map_err(|source| SchemaError::Record {
                collection: key,
                index,
                source,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
