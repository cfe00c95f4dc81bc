pub(crate) mod compose;
pub(crate) mod state;
pub(crate) mod validate;
