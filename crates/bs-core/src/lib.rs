pub mod config;
pub mod content;
pub mod error;
pub mod geometry;
pub mod id;
pub mod insertion;
pub mod library;
pub mod registry;
pub mod throttle;
pub mod tour;
pub mod transform;
pub mod view_mode;

pub use config::{EditorConfig, FullscreenConfirm, TOUR_SEEN_KEY};
pub use content::{ContentNode, ContentState, Highlight, ScoringOption};
pub use error::{Error, Result};
pub use geometry::{NodeSize, Point, Rect, Spacing};
pub use id::{ContentId, InsertId};
pub use insertion::{Freshness, InsertEvent, Insertion};
pub use library::{RawLibrary, RegistryItem};
pub use registry::{GatePhase, LoadFailure, RegistryGate};
pub use throttle::Throttle;
pub use tour::{Onboarding, TourGeometry, TourPhase};
pub use transform::{Effect, EffectKind, PendingEffects, ScaleOptions, TransformState};
pub use view_mode::{Fullscreen, Tab, ViewMode, ViewState};
