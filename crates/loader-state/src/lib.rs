mod binding;
mod event_bus;
mod state;

pub use binding::{BindingPhase, ChannelSurface, StateBinding, Surface};
pub use event_bus::{EventBus, ListenerId, STATE_UPDATE, StateListener};
pub use state::{CssLoaderState, PublicState};
