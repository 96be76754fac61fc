//! `PenScript` recognizer and execution engine.
//!
//! A script is a sequence of lines. Each line is classified by the
//! [`recognizer`], then executed by the [`interpreter`] state machine
//! against a [`surface::DrawingSurface`].

pub mod command;
pub mod config;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod methods;
pub mod recognizer;
pub mod surface;
pub mod types;
pub mod variables;
