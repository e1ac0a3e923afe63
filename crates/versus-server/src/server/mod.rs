mod http_server;

pub use http_server::{routes, start_server};
