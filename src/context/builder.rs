use log::debug;

use crate::amortization::AmortizationItem;
use crate::context::{BaseContext, ContextItem, ContextPatch};
use crate::errors::{Result, ScheduleError};
use crate::events::{EventStore, ScheduleEvent};
use crate::operators::Operator;

/// derive the context for `period` from the previous period's closing state.
///
/// active operators are applied in registration order; their patches merge
/// base -> first -> second -> ... with the last write winning. overwrites are
/// logged and recorded as [`ScheduleEvent::OperatorOverride`].
pub fn build_context_at(
    period: u32,
    previous: &AmortizationItem,
    base: &BaseContext,
    active: &[&Operator],
    events: &mut EventStore,
) -> Result<ContextItem> {
    if period == 0 {
        return Err(ScheduleError::InvalidPeriod {
            value: "0 (period 0 is the seed, not a repayment period)".to_string(),
        });
    }

    if previous.period.checked_add(1) != Some(period) {
        return Err(ScheduleError::PeriodOutOfOrder {
            expected: previous.period.saturating_add(1),
            actual: period,
        });
    }

    let mut context = ContextItem::opening(period, previous.principal_balance, base);

    let mut merged = ContextPatch::default();
    for operator in active {
        let patch = operator.apply(period, &context, base);
        for field in merged.merge(&patch) {
            debug!("period {}: {} overwrote {:?}", period, operator.kind(), field);
            events.emit(ScheduleEvent::OperatorOverride {
                period,
                field,
                operator: operator.kind(),
            });
        }
    }
    context.apply_patch(&merged);

    Ok(context)
}
