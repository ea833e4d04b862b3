//! Request handlers for the rsitems service.

pub mod items;
pub mod process;
