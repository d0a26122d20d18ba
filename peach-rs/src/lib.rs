//! Peach (`) : an interpreted language for fuzzy logic.
//!
//! The engine lives in [`lang`]; [`var`] holds the session's variables.
//! [`cli`], [`config`] and [`repl`] make up the interactive binary.

pub mod cli;
pub mod config;
pub mod lang;
pub mod repl;
pub mod var;
