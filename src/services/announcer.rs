//! Spoken announcements

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

/// Fire-and-forget speech output. A new announcement supersedes any
/// announcement still in flight.
pub trait Announcer: Send + Sync {
    fn announce(&self, text: &str);
}

/// The announcement currently being spoken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: u64,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// Publishes the latest announcement on a watch channel; listeners only ever
/// see the newest one, which gives supersede semantics for free.
#[derive(Debug)]
pub struct WatchAnnouncer {
    tx: watch::Sender<Option<Announcement>>,
}

impl WatchAnnouncer {
    pub fn new() -> (Self, watch::Receiver<Option<Announcement>>) {
        let (tx, rx) = watch::channel(None);
        (Self { tx }, rx)
    }
}

impl Announcer for WatchAnnouncer {
    fn announce(&self, text: &str) {
        let previous = self.tx.borrow().clone();
        let id = previous.as_ref().map_or(1, |a| a.id + 1);
        if let Some(previous) = previous {
            debug!("Superseding announcement #{}: {:?}", previous.id, previous.text);
        }

        info!("Announcing: {}", text);
        self.tx.send_replace(Some(Announcement {
            id,
            text: text.to_string(),
            at: Utc::now(),
        }));
    }
}
