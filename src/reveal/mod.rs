pub(crate) mod controller;
pub(crate) mod event;
pub(crate) mod expansion;
pub(crate) mod transition;
pub(crate) mod viewport;
