//! Bootstrap use cases.
//!
//! Cold-start sequencing and the pluggable credential restoration strategies.

#[cfg(feature = "debug-restoration")]
pub mod debug;
pub mod restoration;
pub mod sequencer;

#[cfg(feature = "debug-restoration")]
pub use debug::DebugRestoration;
pub use restoration::{
    RestorationOrigin, RestorationStrategy, RestoredSession, StoredCredentialRestoration,
};
pub use sequencer::{
    BootstrapError, BootstrapReport, BootstrapSequencer, BootstrapSequencerDeps,
    RestorationOutcome, DEFAULT_READ_TIMEOUT,
};
