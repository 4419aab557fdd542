//! Reusable UI components.

pub mod roadmap;
