pub mod channel;
pub mod context;
pub mod error;
pub mod handlers;
pub mod http_api;
pub mod push;
pub mod server;

pub use context::AppContext;
pub use http_api::HttpApi;
pub use push::HttpPushTransport;
pub use server::{build_router, run_http_server, HttpServerConfig};
