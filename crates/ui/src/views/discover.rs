mod card;
mod results;
mod view;

pub use view::DiscoverView;

#[cfg(test)]
pub(crate) use view::DiscoverTestHandles;
