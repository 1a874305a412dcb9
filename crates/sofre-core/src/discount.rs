//! # Discount Module
//!
//! The per-component discount apply state machine.
//!
//! An order carries two independent discount components: a flat amount and
//! a percentage. Each walks its own lifecycle; applying one never touches
//! the other.
//!
//! ## Apply Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Discount Component Lifecycle                       │
//! │                                                                     │
//! │                 begin()          commit()                           │
//! │  ┌────────────┐ ──────► ┌─────────┐ ──────► ┌─────────┐            │
//! │  │ NotApplied │         │ Pending │         │ Applied │ (terminal) │
//! │  └────────────┘ ◄────── └─────────┘         └─────────┘            │
//! │        ▲        revert()                                            │
//! │        │                                                            │
//! │   value edits legal                                                 │
//! │   only in this state                                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Pending` exists so a backend round trip can sit between `begin` and
//! `commit`: the UI disables the apply button on `begin`, then either locks
//! it on `commit` or re-enables it on `revert` when the call failed. A
//! failed apply is retryable; a successful one is final for the session.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Rate};

// =============================================================================
// States and Kinds
// =============================================================================

/// Lifecycle state of one discount component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ApplyState {
    /// Editable; nothing persisted yet.
    NotApplied,
    /// Apply in flight; edits and re-apply are rejected.
    Pending,
    /// Persisted by the backend; terminal for this session.
    Applied,
}

/// Which of the two discount components is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DiscountKind {
    Amount,
    Percent,
}

// =============================================================================
// Discount Component
// =============================================================================

/// One discount component's value plus its apply state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountComponent {
    kind: DiscountKind,
    state: ApplyState,
}

impl DiscountComponent {
    fn new(kind: DiscountKind) -> Self {
        DiscountComponent { kind, state: ApplyState::NotApplied }
    }

    pub fn state(&self) -> ApplyState {
        self.state
    }

    fn state_error(&self) -> CoreError {
        CoreError::DiscountState { kind: self.kind, state: self.state }
    }

    /// `NotApplied → Pending`. Rejected in any other state.
    pub fn begin(&mut self) -> CoreResult<()> {
        match self.state {
            ApplyState::NotApplied => {
                self.state = ApplyState::Pending;
                Ok(())
            }
            _ => Err(self.state_error()),
        }
    }

    /// `Pending → Applied`. Rejected in any other state.
    pub fn commit(&mut self) -> CoreResult<()> {
        match self.state {
            ApplyState::Pending => {
                self.state = ApplyState::Applied;
                Ok(())
            }
            _ => Err(self.state_error()),
        }
    }

    /// `Pending → NotApplied`, for a failed backend call. Rejected in any
    /// other state.
    pub fn revert(&mut self) -> CoreResult<()> {
        match self.state {
            ApplyState::Pending => {
                self.state = ApplyState::NotApplied;
                Ok(())
            }
            _ => Err(self.state_error()),
        }
    }

    /// True while value edits are legal.
    pub fn is_editable(&self) -> bool {
        self.state == ApplyState::NotApplied
    }
}

// =============================================================================
// Discount Workflow
// =============================================================================

/// Both discount components of one session, with their values.
///
/// Holds the configured values and gates edits on the apply state. It does
/// not talk to the backend itself; the session layer drives
/// `begin`/`commit`/`revert` around its own persistence call.
#[derive(Debug, Clone)]
pub struct DiscountWorkflow {
    amount: Money,
    percent: Rate,
    amount_component: DiscountComponent,
    percent_component: DiscountComponent,
}

impl Default for DiscountWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscountWorkflow {
    pub fn new() -> Self {
        DiscountWorkflow {
            amount: Money::zero(),
            percent: Rate::zero(),
            amount_component: DiscountComponent::new(DiscountKind::Amount),
            percent_component: DiscountComponent::new(DiscountKind::Percent),
        }
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn percent(&self) -> Rate {
        self.percent
    }

    pub fn component(&self, kind: DiscountKind) -> &DiscountComponent {
        match kind {
            DiscountKind::Amount => &self.amount_component,
            DiscountKind::Percent => &self.percent_component,
        }
    }

    fn component_mut(&mut self, kind: DiscountKind) -> &mut DiscountComponent {
        match kind {
            DiscountKind::Amount => &mut self.amount_component,
            DiscountKind::Percent => &mut self.percent_component,
        }
    }

    /// Sets the flat amount. Legal only while the amount component is
    /// `NotApplied`.
    pub fn set_amount(&mut self, amount: Money) -> CoreResult<()> {
        if !self.amount_component.is_editable() {
            return Err(self.amount_component.state_error());
        }
        self.amount = amount;
        Ok(())
    }

    /// Sets the percentage. Legal only while the percent component is
    /// `NotApplied`.
    pub fn set_percent(&mut self, percent: Rate) -> CoreResult<()> {
        if !self.percent_component.is_editable() {
            return Err(self.percent_component.state_error());
        }
        self.percent = percent;
        Ok(())
    }

    /// Starts an apply for one component.
    pub fn begin(&mut self, kind: DiscountKind) -> CoreResult<()> {
        self.component_mut(kind).begin()
    }

    /// Finishes a successful apply.
    pub fn commit(&mut self, kind: DiscountKind) -> CoreResult<()> {
        self.component_mut(kind).commit()
    }

    /// Rolls back a failed apply; the component becomes retryable.
    pub fn revert(&mut self, kind: DiscountKind) -> CoreResult<()> {
        self.component_mut(kind).revert()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
