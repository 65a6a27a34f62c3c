/*
[INPUT]:  Tushare Pro wire schema and serde requirements
[OUTPUT]: Typed request/response envelopes and the result table
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the envelope schema changes or new types are added
*/

pub mod enums;
pub mod requests;
pub mod responses;
pub mod table;

pub use enums::*;
pub use requests::*;
pub use responses::*;
pub use table::*;
