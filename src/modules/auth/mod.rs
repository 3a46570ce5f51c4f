//! Registration, login and the caller's own profile.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
