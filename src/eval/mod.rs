pub(crate) mod anchor;
pub(crate) mod damping;
pub(crate) mod frame;
pub(crate) mod state;
