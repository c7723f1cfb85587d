//! Data Transfer Objects
//!
//! Types crossing the boundary between the binary, the use case and the reporters.

mod report_dto;

pub use report_dto::{AnalysisRequest, SharpeReport};
