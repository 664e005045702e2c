pub mod config_error;
pub mod host_error;
pub mod input_error;
pub mod store_error;
pub mod strata_error;
pub mod transform_error;

pub use config_error::ConfigError;
pub use host_error::HostError;
pub use input_error::InputError;
pub use store_error::StoreError;
pub use strata_error::{StrataError, StrataResult};
pub use transform_error::TransformError;
