pub(crate) mod scroll_lock;
