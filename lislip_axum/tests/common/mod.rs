pub mod mock_services;
pub mod test_server;

pub use mock_services::{MockResponses, MockServices};
pub use test_server::{TestServer, empty_store, seeded_store};
