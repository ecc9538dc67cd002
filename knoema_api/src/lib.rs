pub mod auth;
mod client;
pub mod config;
mod errors;
pub mod multipart;
pub mod request;
pub mod transport;
pub mod types;
pub use self::auth::Authenticator;
pub use self::client::Client;
pub use self::config::ClientConfig;
pub use self::errors::Error;
pub use self::multipart::FileContent;
pub use self::request::{
    DatasetUpload, DatasetVerifyRequest, JsonRequest, PivotAxisItem, PivotRequest, Query,
};
pub use self::transport::{HttpTransport, Transport};
