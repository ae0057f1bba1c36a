//! Adapters implementing the ports in [`crate::port`].

pub mod store;
