//! Scene playback: the clock, the fixed-step ticker, the timeline scheduler, the controller
//! tying them to audio, and the project-level player on top.

pub(crate) mod clock;
pub(crate) mod controller;
pub(crate) mod project;
pub(crate) mod ticker;
pub(crate) mod timeline;
