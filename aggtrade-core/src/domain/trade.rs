//! Trade: a single raw trade print.

use serde::{Deserialize, Serialize};

/// Aggressor side of a trade print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Columnar storage code: BUY = 0, SELL = 1.
    pub const BUY_CODE: i32 = 0;
    pub const SELL_CODE: i32 = 1;

    pub fn code(self) -> i32 {
        match self {
            Side::Buy => Self::BUY_CODE,
            Side::Sell => Self::SELL_CODE,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            Self::BUY_CODE => Some(Side::Buy),
            Self::SELL_CODE => Some(Side::Sell),
            _ => None,
        }
    }

    /// +1.0 for buys, -1.0 for sells.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Side::Buy => 1.0,
            Side::Sell => -1.0,
        }
    }
}

/// A raw trade as delivered by the loader. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub timestamp_ms: i64,
    pub price: f64,
    pub quantity: f64,
    pub side: Side,
}

impl Trade {
    pub fn new(timestamp_ms: i64, price: f64, quantity: f64, side: Side) -> Self {
        Self {
            timestamp_ms,
            price,
            quantity,
            side,
        }
    }

    pub fn buy(timestamp_ms: i64, price: f64, quantity: f64) -> Self {
        Self::new(timestamp_ms, price, quantity, Side::Buy)
    }

    pub fn sell(timestamp_ms: i64, price: f64, quantity: f64) -> Self {
        Self::new(timestamp_ms, price, quantity, Side::Sell)
    }

    /// Price times quantity.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.price * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_codes_are_stable() {
        assert_eq!(Side::Buy.code(), 0);
        assert_eq!(Side::Sell.code(), 1);
        assert_eq!(Side::from_code(0), Some(Side::Buy));
        assert_eq!(Side::from_code(1), Some(Side::Sell));
        assert_eq!(Side::from_code(2), None);
    }

    #[test]
    fn side_signs_are_opposite() {
        assert_eq!(Side::Buy.sign(), -Side::Sell.sign());
    }

    #[test]
    fn trade_serialization_roundtrip() {
        let trade = Trade::sell(1_609_459_200_000, 42_000.5, 0.25);
        let json = serde_json::to_string(&trade).unwrap();
        assert!(json.contains("\"SELL\""));
        let deser: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, deser);
    }
}
