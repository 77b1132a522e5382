//! Domain layer - Core business logic
//!
//! This module contains the domain entities, the repository traits the
//! pipeline talks to, and the scoring and geometry services.

pub mod entities;
pub mod repositories;
pub mod services;
