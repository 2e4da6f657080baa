//! Record every degradation within an invocation: component, failure, and
//! the fallback that was used instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tracing_setup::events;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    events: Vec<DegradationEvent>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a `degradation_triggered` event and keep it for reporting.
    pub fn record(
        &mut self,
        component: impl Into<String>,
        failure: impl Into<String>,
        fallback_used: impl Into<String>,
    ) {
        let event = DegradationEvent {
            component: component.into(),
            failure: failure.into(),
            fallback_used: fallback_used.into(),
            timestamp: Utc::now(),
        };
        events::degradation_triggered(&event.component, &event.failure, &event.fallback_used);
        self.events.push(event);
    }

    pub fn events(&self) -> &[DegradationEvent] {
        &self.events
    }

    pub fn count(&self, component: &str) -> usize {
        self.events
            .iter()
            .filter(|e| e.component == component)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Hand over the recorded events and start fresh.
    pub fn drain(&mut self) -> Vec<DegradationEvent> {
        std::mem::take(&mut self.events)
    }
}
