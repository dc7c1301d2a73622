mod conformance_close_hook;
pub(crate) mod macros;
