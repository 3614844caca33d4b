//! Feature slices. Each owns its state, reducer helpers and view.

pub mod catalog;
pub mod credentials;
pub mod statusline;
