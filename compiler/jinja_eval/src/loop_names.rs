//! Names of the `loop` pseudo-variable and its fields.

pub(crate) const LOOP: &str = "loop";

pub(crate) const LENGTH: &str = "length";
pub(crate) const INDEX: &str = "index";
pub(crate) const INDEX0: &str = "index0";
pub(crate) const FIRST: &str = "first";
pub(crate) const LAST: &str = "last";
pub(crate) const PREVITEM: &str = "previtem";
pub(crate) const NEXTITEM: &str = "nextitem";

/// `loop.cycle(...)`
pub(crate) const CYCLE: &str = "cycle";
