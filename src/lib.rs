pub mod amortization;
pub mod config;
pub mod context;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod events;
pub mod formula;
pub mod operators;
pub mod types;

// re-export key types
pub use amortization::{AmortizationCalculator, AmortizationItem, AmortizationResult, Totals};
pub use config::ScheduleConfig;
pub use context::{BaseContext, ContextField, ContextItem, ContextPatch};
pub use decimal::{Money, Rate};
pub use engine::ScheduleEngine;
pub use errors::{Result, ScheduleError};
pub use events::{EventStore, RecalculationReason, ScheduleEvent};
pub use operators::{Operator, OperatorKind, OperatorProvider, OperatorSet, PeriodWindow, ScheduledOperator};
pub use types::{CalculationMode, Frequency, RepaymentType};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
