pub mod enums;
pub mod record;
pub mod notification;
pub mod prescription;

pub use enums::*;
pub use record::*;
pub use notification::*;
pub use prescription::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
