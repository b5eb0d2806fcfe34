//! Employee expense-report portal: page views, page controllers and the router that
//! drives them over a remote bill storage service.

pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod router;
pub mod routes;
pub mod ui;

pub use controller::events::{OnNavigate, UiAction};
pub use document::Document;
pub use error::PortalError;
pub use router::{DispatchOutcome, RouteOutcome, Router, RouterOptions};
pub use routes::{paths, Route};

#[cfg(test)]
#[path = "tests/fixtures.rs"]
pub(crate) mod fixtures;
