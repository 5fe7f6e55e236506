//! Terminal front end: the conversion and swap widgets plus setup.

pub mod client;
pub mod convert;
pub mod setup;
pub mod swap;
pub mod ui;
pub mod widget;
