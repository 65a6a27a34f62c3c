/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Tushare Pro adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    AsyncCall,
    AsyncDataApi,
    ClientConfig,
    Credentials,
    HttpSession,
    Result,
    Session,
    TushareError,
};

#[cfg(feature = "blocking")]
pub use http::{BlockingCall, DataApi};

// Re-export all types
pub use types::*;
