//! Session controller: the single owner and writer of chat state.

pub mod controller;
