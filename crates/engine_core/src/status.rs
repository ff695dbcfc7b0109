//! Lifecycle and leg enumerations.
//!
//! This module provides:
//! - [`TradeStatus`]: the four lifecycle states of a booked trade
//! - [`PayReceive`]: the direction of a leg's payments
//! - [`LegKind`]: fixed versus floating rate legs
//!
//! # Examples
//!
//! ```
//! use engine_core::status::TradeStatus;
//!
//! assert!(TradeStatus::Terminated.is_terminal());
//! assert!(!TradeStatus::Amended.is_terminal());
//! assert_eq!("CANCELLED".parse::<TradeStatus>().unwrap(), TradeStatus::Cancelled);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ParseEnumError;

/// Lifecycle status of a trade version.
///
/// NEW is the only initial state. TERMINATED and CANCELLED are terminal.
/// AMENDED is both a resting state and re-enterable: a trade may be
/// amended repeatedly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum TradeStatus {
    /// Freshly booked, version 1.
    New,
    /// Superseding version produced by an amendment.
    Amended,
    /// Terminated before or at maturity; terminal.
    Terminated,
    /// Cancelled as if never booked; terminal.
    Cancelled,
}

impl TradeStatus {
    /// Returns the canonical upper-case status name.
    pub fn name(&self) -> &'static str {
        match self {
            TradeStatus::New => "NEW",
            TradeStatus::Amended => "AMENDED",
            TradeStatus::Terminated => "TERMINATED",
            TradeStatus::Cancelled => "CANCELLED",
        }
    }

    /// Returns whether no further lifecycle transition may leave this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TradeStatus::Terminated | TradeStatus::Cancelled)
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TradeStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NEW" => Ok(TradeStatus::New),
            "AMENDED" => Ok(TradeStatus::Amended),
            "TERMINATED" => Ok(TradeStatus::Terminated),
            "CANCELLED" => Ok(TradeStatus::Cancelled),
            _ => Err(ParseEnumError::new("trade status", s)),
        }
    }
}

/// Direction of a leg's payments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum PayReceive {
    /// We pay this leg.
    Pay,
    /// We receive this leg.
    Receive,
}

impl PayReceive {
    /// Returns the canonical upper-case flag name.
    pub fn name(&self) -> &'static str {
        match self {
            PayReceive::Pay => "PAY",
            PayReceive::Receive => "RECEIVE",
        }
    }

    /// Returns the opposite direction.
    ///
    /// The two legs of a booked trade must carry opposite directions.
    pub fn opposite(&self) -> PayReceive {
        match self {
            PayReceive::Pay => PayReceive::Receive,
            PayReceive::Receive => PayReceive::Pay,
        }
    }
}

impl fmt::Display for PayReceive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PayReceive {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PAY" => Ok(PayReceive::Pay),
            "RECEIVE" | "REC" => Ok(PayReceive::Receive),
            _ => Err(ParseEnumError::new("pay/receive flag", s)),
        }
    }
}

/// Rate type of a trade leg.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum LegKind {
    /// Pays a fixed rate for the life of the trade.
    Fixed,
    /// Pays a variable rate fixed against a market index.
    Floating,
}

impl LegKind {
    /// Returns the canonical upper-case kind name.
    pub fn name(&self) -> &'static str {
        match self {
            LegKind::Fixed => "FIXED",
            LegKind::Floating => "FLOATING",
        }
    }
}

impl fmt::Display for LegKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LegKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FIXED" => Ok(LegKind::Fixed),
            "FLOATING" => Ok(LegKind::Floating),
            _ => Err(ParseEnumError::new("leg type", s)),
        }
    }
}
