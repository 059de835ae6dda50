use serde::{Deserialize, Serialize};

use crate::context::ContextField;
use crate::decimal::{Money, Rate};
use crate::operators::OperatorKind;

/// why the scheduled repayment was recomputed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecalculationReason {
    FirstPeriod,
    RateChanged,
}

/// notable transitions during a schedule calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScheduleEvent {
    RepaymentRecalculated {
        period: u32,
        previous_repayment: Money,
        repayment: Money,
        eff_interest_rate: Rate,
        reason: RecalculationReason,
    },
    InterestRateChanged {
        period: u32,
        old_rate: Rate,
        new_rate: Rate,
    },
    /// a later operator overwrote a field an earlier one set in the same period
    OperatorOverride {
        period: u32,
        field: ContextField,
        operator: OperatorKind,
    },
    /// repayment cut down to the outstanding balance plus interest
    FinalRepaymentCapped {
        period: u32,
        requested: Money,
        repayment: Money,
    },
    /// loan balance reached zero before the nominal term
    EarlyPayoff {
        period: u32,
        periods_remaining: u32,
    },
}

/// event store for collecting events during a calculation
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<ScheduleEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: ScheduleEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<ScheduleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_collects_and_drains() {
        let mut store = EventStore::new();
        store.emit(ScheduleEvent::EarlyPayoff {
            period: 80,
            periods_remaining: 40,
        });

        assert_eq!(store.events().len(), 1);
        let drained = store.take_events();
        assert_eq!(drained.len(), 1);
        assert!(store.events().is_empty());

        store.emit(ScheduleEvent::EarlyPayoff {
            period: 1,
            periods_remaining: 0,
        });
        store.clear();
        assert!(store.events().is_empty());
    }
}
