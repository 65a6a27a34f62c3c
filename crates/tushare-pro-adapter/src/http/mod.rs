/*
[INPUT]:  HTTP client configuration and the Tushare Pro endpoint
[OUTPUT]: Blocking and async clients returning result tables
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding client variants or changing the transport seam
*/

pub mod async_client;
#[cfg(feature = "blocking")]
pub mod blocking_client;
pub mod client;
pub mod error;
pub mod session;

pub use error::{Result, TushareError};

pub use async_client::{AsyncCall, AsyncDataApi};
#[cfg(feature = "blocking")]
pub use blocking_client::{BlockingCall, DataApi};
pub use client::{ClientConfig, Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use session::{HttpSession, Session};
