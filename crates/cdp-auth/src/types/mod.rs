/*
[INPUT]:  Token formats and caller-facing request parameters
[OUTPUT]: Typed Rust structs/enums with serialization support
[POS]:    Data layer - type definitions shared by auth and http layers
[UPDATE]: When request options or token algorithms change
*/

pub mod enums;
pub mod requests;

pub use enums::*;
pub use requests::*;
