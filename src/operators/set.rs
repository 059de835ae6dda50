use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::operators::{Operator, PeriodWindow};

/// operator with its activation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledOperator {
    pub operator: Operator,
    pub window: PeriodWindow,
}

impl ScheduledOperator {
    pub fn new(operator: Operator, window: PeriodWindow) -> Self {
        Self { operator, window }
    }

    pub fn validate(&self) -> Result<()> {
        self.window.validate()?;
        self.operator.validate()
    }
}

/// source of the operators active in a period, in the order they must apply
pub trait OperatorProvider {
    fn active_at(&self, period: u32) -> Vec<&Operator>;
}

/// operators in registration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatorSet {
    operators: Vec<ScheduledOperator>,
}

impl OperatorSet {
    pub fn new() -> Self {
        Self {
            operators: Vec::new(),
        }
    }

    /// register an operator after every operator already in the set
    pub fn push(&mut self, scheduled: ScheduledOperator) -> Result<()> {
        scheduled.validate()?;
        self.operators.push(scheduled);
        Ok(())
    }

    pub fn add(&mut self, operator: Operator, window: PeriodWindow) -> Result<()> {
        self.push(ScheduledOperator::new(operator, window))
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledOperator> {
        self.operators.iter()
    }
}

impl OperatorProvider for OperatorSet {
    fn active_at(&self, period: u32) -> Vec<&Operator> {
        self.operators
            .iter()
            .filter(|scheduled| scheduled.window.contains(period))
            .map(|scheduled| &scheduled.operator)
            .collect()
    }
}

impl TryFrom<Vec<ScheduledOperator>> for OperatorSet {
    type Error = crate::errors::ScheduleError;

    fn try_from(operators: Vec<ScheduledOperator>) -> Result<Self> {
        let mut set = OperatorSet::new();
        for scheduled in operators {
            set.push(scheduled)?;
        }
        Ok(set)
    }
}
