//! Weekly production scheduling for a furniture workshop. Orders break
//! into details, details into stages, and stages receive per-day employee
//! assignments rendered on a Monday-based week board.

pub mod connector;
pub mod filter;
pub mod form;
pub mod model;
pub mod normalize;
pub mod queries;
pub mod routes;
pub mod state;
pub mod view;
pub mod week;
