pub(crate) mod compile;
pub(crate) mod dsl;
pub(crate) mod model;
pub(crate) mod validate;
pub(crate) mod value;
