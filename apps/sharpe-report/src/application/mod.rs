//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for the price and risk-free data providers
//! - **Use Cases**: The fetch → transform → compute pipeline
//! - **DTOs**: Analysis request and report

pub mod dto;
pub mod ports;
pub mod use_cases;

pub use dto::*;
pub use ports::*;
pub use use_cases::*;
