//! Inventory assets, exposed over HTTP as "products".
//!
//! Reads are open to any authenticated caller. Create, update and delete
//! require the admin role.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
