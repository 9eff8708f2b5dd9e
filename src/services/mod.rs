//! External collaborators
//!
//! Audio cues, spoken announcements, presentation callbacks and the saved
//! workout store. The timer only talks to these through their traits.

pub mod announcer;
pub mod cues;
pub mod presenter;
pub mod storage;

// Re-export main types
pub use announcer::{Announcement, Announcer, WatchAnnouncer};
pub use cues::{Cue, CuePlayer, TerminalCuePlayer, CUE_DURATION};
pub use presenter::{Presenter, PresenterFeed, WatchPresenter};
pub use storage::{
    JsonFileStore, KeyValueStore, MemoryStore, SavedWorkouts, StoreError, WorkoutLibrary,
};
