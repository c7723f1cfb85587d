//! Application Use Cases

mod analyze_sharpe;

pub use analyze_sharpe::{AnalysisError, AnalyzeSharpeUseCase, risk_free_window};
