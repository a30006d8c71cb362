//! Backend boundary: abstract contracts and the HTTP implementation

mod http;
mod traits;

pub use http::HttpBusinessApi;
pub use traits::{BusinessApi, RemoteError, RemoteResult, DUPLICATE_MARKER};
