//! # Channel Module
//!
//! Sales channels and the tax/rounding profile attached to each.
//!
//! The three channels run the same totals pipeline but feed it different
//! parameters:
//!
//! ```text
//! ┌──────────────┬─────────────┬───────────────┐
//! │   Channel    │  Tax Rate   │  Tax Rounding │
//! ├──────────────┼─────────────┼───────────────┤
//! │   Counter    │     12%     │    half-up    │
//! │   Table      │      9%     │    half-up    │
//! │   Takeaway   │     12%     │     floor     │
//! └──────────────┴─────────────┴───────────────┘
//! ```
//!
//! These are session defaults. The counter panel lets the cashier type a
//! different tax percent per order; table and takeaway sessions keep the
//! profile rate.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Rate, RoundingMode};

// =============================================================================
// Channel
// =============================================================================

/// Where an order is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Channel {
    /// Walk-in sales at the register.
    Counter,
    /// Dine-in, attached to a numbered table.
    Table,
    /// Phone or pickup orders.
    Takeaway,
}

impl Channel {
    /// Default tax and rounding profile for this channel.
    pub const fn default_profile(&self) -> ChannelProfile {
        match self {
            Channel::Counter => ChannelProfile {
                tax_rate: Rate::from_bps(1_200),
                rounding: RoundingMode::HalfUp,
            },
            Channel::Table => ChannelProfile {
                tax_rate: Rate::from_bps(900),
                rounding: RoundingMode::HalfUp,
            },
            Channel::Takeaway => ChannelProfile {
                tax_rate: Rate::from_bps(1_200),
                rounding: RoundingMode::Floor,
            },
        }
    }
}

// =============================================================================
// Channel Profile
// =============================================================================

/// Tax parameters one channel feeds into the totals pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChannelProfile {
    pub tax_rate: Rate,
    pub rounding: RoundingMode,
}

impl ChannelProfile {
    /// Profile with an overridden tax rate, keeping the channel's rounding.
    pub const fn with_tax_rate(self, tax_rate: Rate) -> Self {
        ChannelProfile { tax_rate, rounding: self.rounding }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
