//! Audio: the transport seam, an in-memory backend and the synchronizer driving both.

pub(crate) mod backend;
pub(crate) mod cue;
pub(crate) mod memory;
pub(crate) mod ramp;
pub(crate) mod sync;
