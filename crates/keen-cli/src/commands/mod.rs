//! Command handlers. Each handler translates parsed arguments into calls
//! on the core services and renders the result.

pub mod create;
