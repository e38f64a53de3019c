use crate::foundation::error::StoryResult;
use crate::scene::model::AudioTrack;

/// Load progress of a transport's source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Source still fetching or decoding.
    Loading,
    /// Ready to play.
    Ready,
    /// Source could not be loaded; the transport will never play.
    Failed,
}

/// A playback handle for one loaded track.
///
/// Positions are seconds from the start of the source. Implementations must tolerate any call
/// in any state; a failed or unloaded transport ignores commands.
pub trait Transport {
    /// Current load state.
    fn load_state(&self) -> LoadState;
    /// Whether audio is currently advancing.
    fn is_playing(&self) -> bool;
    /// Start or resume from the current position.
    fn play(&mut self);
    /// Pause, keeping the position.
    fn pause(&mut self);
    /// Pause and rewind to the start.
    fn stop(&mut self);
    /// Move the play head.
    fn seek(&mut self, secs: f64);
    /// Current play head.
    fn position(&self) -> f64;
    /// Set the output gain in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);
    /// Current output gain.
    fn volume(&self) -> f32;
    /// Release the source. The transport is inert afterwards.
    fn unload(&mut self);
}

/// Creates transports for tracks.
pub trait AudioBackend {
    /// Start loading `track`.
    ///
    /// An `Err` means the track could not even be requested. Asynchronous failures surface later
    /// through [`Transport::load_state`].
    fn load(&mut self, track: &AudioTrack) -> StoryResult<Box<dyn Transport>>;
}
