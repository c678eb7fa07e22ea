//! Client core for a places directory: API access, session handling, search
//! and map selection state.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
