//! Counterfactual formulas: "forcing the intervention would make the
//! event hold."

use std::fmt;

use causalis_core::{Assignment, CausalResult, Event};

use crate::setting::CausalSetting;

/// An `(intervention, event)` pair. Entailment is a pure function of the
/// formula and the setting, so repeated checks inside search loops share
/// no state.
#[derive(Debug, Clone)]
pub struct CausalFormula {
    intervention: Assignment,
    event: Event,
}

impl CausalFormula {
    pub fn new(intervention: Assignment, event: Event) -> Self {
        Self {
            intervention,
            event,
        }
    }

    pub fn intervention(&self) -> &Assignment {
        &self.intervention
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Intervene on the setting's network, rebuild the setting under the
    /// same context and domains, and evaluate the event there.
    pub fn entailed_by(&self, setting: &CausalSetting) -> CausalResult<bool> {
        let intervened = setting.network().intervene(&self.intervention);
        let new_setting = CausalSetting::new(
            intervened,
            setting.context().clone(),
            setting.endogenous_domains().clone(),
        )?;
        Ok(self.event.evaluate(new_setting.values()))
    }
}

impl fmt::Display for CausalFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (variable, value)) in self.intervention.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{variable}<-{value}")?;
        }
        write!(f, "]({})", self.event)
    }
}
