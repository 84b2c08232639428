//! # ChainMatch Recommend
//!
//! Rule-based blockchain architecture recommendation.
//!
//! [`recommend`] maps a normalized [`Query`](chainmatch_core::Query) to a
//! [`Recommendation`]: blockchain type, platform, consensus, storage strategy,
//! network topology and security advice. It is a pure function: no
//! randomness, no I/O, identical output for identical input.
//!
//! ## Decision chain
//!
//! ```text
//! scenario signals ──┬──> blockchain type ──> platform ──> consensus
//!                    │          │
//!                    │          ├──> network suggestion
//!                    │          └──> security advice
//!                    └──> storage
//! ```
//!
//! Every step is a public function in [`decision`] so each branch can be
//! tested on its own.

pub mod decision;
pub mod model;

pub use decision::{recommend, ScenarioSignals};
pub use model::{BlockchainType, Consensus, Platform, Recommendation, Storage};
