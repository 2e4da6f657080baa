mod formula;
mod invocation;
mod mode;
mod observation;
mod prediction;

pub use formula::{
    AverageBand, Condition, Formula, FormulaSet, Prediction, RuleFamily, SetCounters,
};
pub use invocation::{InvocationOutcome, InvocationResult, ModeReport, PolicyState};
pub use mode::{Label, Mode};
pub use observation::{compare_period_ids, sort_observations, successor_period_id, Observation};
pub use prediction::{PredictionOrigin, PredictionRecord};
