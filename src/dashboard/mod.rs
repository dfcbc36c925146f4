//! Dashboard workflows
//!
//! Each dashboard owns its screen state explicitly: the current page, the
//! loaded lists, and any optimistic values waiting on the API. A dashboard
//! is constructed from a session; there is no global session access.

mod supplier;
mod user;

pub use supplier::*;
pub use user::*;
