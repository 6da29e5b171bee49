pub(crate) mod memory;
pub(crate) mod surface;
#[cfg(feature = "web")]
pub(crate) mod web;
