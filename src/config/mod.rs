//! JSON configuration of the command-line tools.
//!
//! Config structs mirror the runtime parameter types but use field names and
//! units suited to hand-written files; every field has a default.

pub mod estimator;
