//! Domain logic with no I/O: shared types, errors, input validation,
//! rubric score extraction and tagged-screenplay parsing.
//!
//! Everything here is a pure function of its inputs so it can be used by the
//! repository layer, the HTTP layer and tests alike.

pub mod error;
pub mod rubric;
pub mod screenplay;
pub mod types;
pub mod validation;
