//! Order domain vocabulary
//!
//! The status state machine is the heart of the kanban board: statuses are
//! ordered and only ever advance one step at a time through the normal flow.
//! Direct reassignment (drag-and-drop between columns) is a separate,
//! audited operation at the service layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Order status - ordered, monotonic under `advance`
///
/// Wire values keep the Portuguese labels the kanban columns display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    #[serde(rename = "Recebido")]
    Recebido,
    #[serde(rename = "Em Preparo")]
    EmPreparo,
    #[serde(rename = "Pronto")]
    Pronto,
    #[serde(rename = "Entregue")]
    Entregue,
}

impl OrderStatus {
    /// All statuses in board order
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Recebido,
        OrderStatus::EmPreparo,
        OrderStatus::Pronto,
        OrderStatus::Entregue,
    ];

    /// Position in the ordered list (Recebido=0 .. Entregue=3)
    pub fn rank(&self) -> u8 {
        match self {
            OrderStatus::Recebido => 0,
            OrderStatus::EmPreparo => 1,
            OrderStatus::Pronto => 2,
            OrderStatus::Entregue => 3,
        }
    }

    /// Next status in the fixed flow, `None` at the terminal state
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Recebido => Some(OrderStatus::EmPreparo),
            OrderStatus::EmPreparo => Some(OrderStatus::Pronto),
            OrderStatus::Pronto => Some(OrderStatus::Entregue),
            OrderStatus::Entregue => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Entregue)
    }

    /// Wire/display label
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Recebido => "Recebido",
            OrderStatus::EmPreparo => "Em Preparo",
            OrderStatus::Pronto => "Pronto",
            OrderStatus::Entregue => "Entregue",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown order status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Recebido" => Ok(OrderStatus::Recebido),
            "Em Preparo" => Ok(OrderStatus::EmPreparo),
            "Pronto" => Ok(OrderStatus::Pronto),
            "Entregue" => Ok(OrderStatus::Entregue),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Order channel - delivery vs. dine-in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderType {
    #[serde(rename = "Delivery")]
    Delivery,
    #[serde(rename = "No Restaurante")]
    NoRestaurante,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Delivery => "Delivery",
            OrderType::NoRestaurante => "No Restaurante",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the order came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeadSource {
    Site,
    Whatsapp,
    Restaurante,
}

/// One product line inside an order
///
/// Products are referenced by exact name; the stock ledger resolves the
/// line against the catalog at finalize time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub name: String,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_chain_is_monotonic() {
        let mut status = OrderStatus::Recebido;
        let mut prev_rank = status.rank();
        while let Some(next) = status.next() {
            assert!(next.rank() > prev_rank);
            prev_rank = next.rank();
            status = next;
        }
        assert_eq!(status, OrderStatus::Entregue);
        assert!(status.is_terminal());
        assert_eq!(status.next(), None);
    }

    #[test]
    fn ranks_follow_board_order() {
        for (i, status) in OrderStatus::ALL.iter().enumerate() {
            assert_eq!(status.rank() as usize, i);
        }
    }

    #[test]
    fn status_serde_uses_display_labels() {
        let json = serde_json::to_string(&OrderStatus::EmPreparo).unwrap();
        assert_eq!(json, "\"Em Preparo\"");
        let parsed: OrderStatus = serde_json::from_str("\"Entregue\"").unwrap();
        assert_eq!(parsed, OrderStatus::Entregue);
    }

    #[test]
    fn status_from_str_round_trips() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("Cancelado".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn order_type_labels() {
        assert_eq!(
            serde_json::to_string(&OrderType::NoRestaurante).unwrap(),
            "\"No Restaurante\""
        );
    }

    #[test]
    fn line_observation_round_trips() {
        let line = OrderLine {
            name: "Pizza".to_string(),
            quantity: 3,
            observation: Some("sem cebola".to_string()),
        };
        let json = serde_json::to_string(&line).unwrap();
        let back: OrderLine = serde_json::from_str(&json).unwrap();
        assert_eq!(back, line);
    }
}
