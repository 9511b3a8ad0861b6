//! External collaborators, injected at construction.
//!
//! Requests go out through these traits; answers come back later as
//! [`Message`](crate::message::Message)s fed to the controller. Nothing here
//! blocks, and nothing can be cancelled: a controller that has been
//! unmounted simply ignores whatever arrives afterwards.

use bs_core::{ContentNode, Error};

/// Content-type registry: metadata lookup and asset loading.
pub trait LibraryRegistry {
    /// Answered by `LibrariesFetched` or `LibrariesFetchFailed`.
    fn fetch_metadata(&mut self, requested: &[String]);

    /// Answered by `LibraryLoaded` or `LibraryFailed`.
    fn load_assets(&mut self, qualified_name: &str);
}

/// Per-user persisted flags.
pub trait KeyValueStore {
    /// Answered by `TourFlagLoaded`.
    fn get(&mut self, key: &str);

    /// Fire-and-forget write.
    ///
    /// # Errors
    /// [`Error::StorageUnavailable`] when the backing store rejects the write.
    fn set(&mut self, key: &str, value: bool) -> Result<(), Error>;
}

/// The editor shell hosting the controller.
pub trait HostShell {
    fn fullscreen_supported(&self) -> bool;

    /// Content edited on the canvas; the host owns persistence.
    fn content_changed(&mut self, content: &[ContentNode]);

    fn fullscreen_toggled(&mut self, enabled: bool);
}

pub struct Collaborators {
    pub registry: Box<dyn LibraryRegistry>,
    pub store: Box<dyn KeyValueStore>,
    pub host: Box<dyn HostShell>,
}
