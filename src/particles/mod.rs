pub(crate) mod field;
pub(crate) mod formation;
pub(crate) mod motion;
