//! Internship portal workflows: user registration, vacancy postings with applications, and
//! practice reports reviewed by companies. Everything lives in process memory.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
