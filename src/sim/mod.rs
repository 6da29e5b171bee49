pub(crate) mod trace;
