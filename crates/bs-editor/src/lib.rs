pub mod collaborators;
pub mod controller;
pub mod layout;
pub mod message;
pub mod props;

pub use collaborators::{Collaborators, HostShell, KeyValueStore, LibraryRegistry};
pub use controller::{EditorController, Lifecycle};
pub use message::Message;
