//! Argument parsing and reporting for the `twosat` binary.

pub(crate) mod cli;
