//! Environments and their variables

mod types;

pub use types::{Environment, VariableMap, is_valid_variable_name, select_active};
