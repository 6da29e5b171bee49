pub(crate) mod dismissal;
pub(crate) mod hint;
pub(crate) mod phase_timer;
