use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementType {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
    #[serde(rename = "ADJUSTMENT")]
    Adjustment,
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementType::In => write!(f, "IN"),
            MovementType::Out => write!(f, "OUT"),
            MovementType::Adjustment => write!(f, "ADJUSTMENT"),
        }
    }
}

impl FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IN" => Ok(MovementType::In),
            "OUT" => Ok(MovementType::Out),
            "ADJUSTMENT" => Ok(MovementType::Adjustment),
            _ => Err(format!("Unknown movement type: {s} (expected IN, OUT or ADJUSTMENT)")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: String,
    pub id_article: String,
    pub id_stockroom: String,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: i64,
    pub moved_at: DateTime<Utc>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMovement {
    pub id_article: String,
    pub id_stockroom: String,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: i64,
    pub moved_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Per-type movement totals over a window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovementTotals {
    #[serde(rename = "IN")]
    pub inbound: i64,
    #[serde(rename = "OUT")]
    pub outbound: i64,
    #[serde(rename = "ADJUSTMENT")]
    pub adjustment: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementSummary {
    #[serde(default)]
    pub article_id: Option<String>,
    #[serde(default)]
    pub stockroom_id: Option<String>,
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
    pub totals: MovementTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_type_wire_format() {
        assert_eq!(serde_json::to_string(&MovementType::In).unwrap(), "\"IN\"");
        assert_eq!(
            serde_json::from_str::<MovementType>("\"ADJUSTMENT\"").unwrap(),
            MovementType::Adjustment
        );
        assert_eq!("out".parse::<MovementType>().unwrap(), MovementType::Out);
        assert!("TRANSFER".parse::<MovementType>().is_err());
    }
}
