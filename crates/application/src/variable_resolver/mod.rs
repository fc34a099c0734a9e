//! Variable resolution module
//!
//! Parses and substitutes `{{variable}}` tokens using the active environment.
//!
//! # Usage
//!
//! ```
//! use chrono::Utc;
//! use workbench_application::variable_resolver::substitute;
//! use workbench_domain::Environment;
//!
//! let env = Environment::new("user-1", "dev", Utc::now()).with_variable("host", "localhost");
//!
//! assert_eq!(substitute("http://{{host}}/api", Some(&env)), "http://localhost/api");
//! assert_eq!(substitute("http://{{port}}", Some(&env)), "http://{{port}}");
//! ```

pub mod engine;
pub mod parser;

pub use engine::{Segment, VariableResolver, find_unresolved, highlight, substitute};
pub use parser::{VariableReference, has_variables, parse_variables};
