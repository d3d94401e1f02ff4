//! Asymmetry phase, reversal detection, coexistence.

pub mod asymmetry;
pub mod coexist;
pub mod reversal;

pub use asymmetry::{AsymmetrySignals, AsymmetryState, Phase, Transition};
pub use coexist::{CoexistIndicators, CoexistState, Moment};
pub use reversal::{ReversalState, Signal, SignalType};
