pub mod dto;

mod error;
pub use error::{ErrorResponse, WebError, WebResult};

mod state;
pub use state::AppState;

pub mod routes;

pub mod doc;
