// lib.rs
// 训练配置库入口，声明并导出各子模块。
mod coerce;
pub mod dataset;
pub mod error;
pub mod hyper_params;
pub mod schema;

pub use dataset::DatasetConfig;
pub use error::{Error, ErrorKind, FieldError, Result, ValidationError};
pub use hyper_params::HyperParameters;
pub use schema::ConfigSchema;
