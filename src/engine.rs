use crate::amortization::{AmortizationCalculator, AmortizationResult};
use crate::config::ScheduleConfig;
use crate::context::BaseContext;
use crate::errors::Result;
use crate::events::{EventStore, ScheduleEvent};
use crate::operators::{OperatorSet, ScheduledOperator};

/// schedule engine: a validated configuration with its base context and operators
#[derive(Debug, Clone)]
pub struct ScheduleEngine {
    config: ScheduleConfig,
    base: BaseContext,
    operators: OperatorSet,
}

impl ScheduleEngine {
    /// validate the configuration and normalize it into a base context.
    /// operators listed in the configuration are registered in order.
    pub fn new(config: ScheduleConfig) -> Result<Self> {
        let base = BaseContext::from_config(&config)?;
        let operators = OperatorSet::try_from(config.operators.clone())?;

        Ok(Self {
            config,
            base,
            operators,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(ScheduleConfig::from_json(json)?)
    }

    /// register another operator after the configured ones
    pub fn with_operator(mut self, scheduled: ScheduledOperator) -> Result<Self> {
        self.operators.push(scheduled)?;
        Ok(self)
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn base_context(&self) -> &BaseContext {
        &self.base
    }

    pub fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    /// run the schedule; repeated calls give identical results
    pub fn calculate(&self) -> Result<AmortizationResult> {
        AmortizationCalculator::new(&self.base).calculate(&self.operators)
    }

    /// run the schedule and return the events recorded along the way
    pub fn calculate_with_events(&self) -> Result<(AmortizationResult, Vec<ScheduleEvent>)> {
        let mut events = EventStore::new();
        let result = AmortizationCalculator::new(&self.base).calculate_with_events(&self.operators, &mut events)?;
        Ok((result, events.take_events()))
    }
}
