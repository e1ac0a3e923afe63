mod handlers;
mod models;

pub use handlers::*;
pub use models::*;
