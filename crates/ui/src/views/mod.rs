mod discover;
pub(crate) mod drag;
mod overview;
mod state;
mod welcome;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use discover::DiscoverView;
pub(crate) use drag::DragSurface;
pub use overview::OverviewView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use welcome::WelcomeView;
