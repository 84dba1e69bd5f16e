mod dashboard;
mod error;
mod router;
mod safe;
mod state;

pub use error::{ErrorResponse, IntoResponseError, MessageBody};
pub use router::{lislip_router, lislip_router_no_trace};
pub use state::AppState;
