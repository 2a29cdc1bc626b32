pub(crate) mod ease;
pub(crate) mod keyframes;
pub(crate) mod orbit;
pub(crate) mod proc;
