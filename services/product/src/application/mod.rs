//! 应用层

mod service;

pub use service::*;
