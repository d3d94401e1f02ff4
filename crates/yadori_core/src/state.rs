//! `EntityState`: the single aggregate, owned exclusively by whatever layer
//! drives events. Created once at genesis, then only ever replaced by the
//! two event entry points — never mutated by a third path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dynamics::{AsymmetryState, CoexistState, ReversalState};
use crate::form::FormState;
use crate::genesis::Seed;
use crate::growth::GrowthState;
use crate::language::LanguageState;
use crate::memory::MemoryState;
use crate::perception::PerceptionGrowth;
use crate::status::Status;
use crate::sulk::SulkState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub seed: Seed,
    pub status: Status,
    pub sulk: SulkState,
    pub language: LanguageState,
    pub memory: MemoryState,
    pub growth: GrowthState,
    pub form: FormState,
    pub perception_growth: PerceptionGrowth,
    pub asymmetry: AsymmetryState,
    pub reversal: ReversalState,
    pub coexist: CoexistState,
}

impl EntityState {
    pub fn new(seed: Seed, now: DateTime<Utc>) -> Self {
        let mut growth = GrowthState::new();
        growth.record_milestone("first_breath", "First Breath", 0, now);

        let species = seed.perception;
        let base_form = seed.form;
        Self {
            seed,
            status: Status::default(),
            sulk: SulkState::default(),
            language: LanguageState::new(species),
            memory: MemoryState::default(),
            growth,
            form: FormState::new(base_form),
            perception_growth: PerceptionGrowth::default(),
            asymmetry: AsymmetryState::default(),
            reversal: ReversalState::default(),
            coexist: CoexistState::default(),
        }
    }

    /// `floor((now - seed.created_at) / 1 day)`, never negative.
    pub fn growth_day_at(&self, now: DateTime<Utc>) -> u64 {
        let elapsed = now - self.seed.created_at;
        elapsed.num_days().max(0) as u64
    }
}
