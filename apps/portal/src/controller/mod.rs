//! Controller layer: page controllers and the user actions routed to them.

pub mod bills;
pub mod events;
pub mod login;
pub mod new_bill;
