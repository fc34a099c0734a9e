//! Environment use cases

mod delete_environment;
mod list_environments;
mod load_environment;
mod save_environment;
mod select_environment;

pub use delete_environment::DeleteEnvironment;
pub use list_environments::{ListEnvironments, ListEnvironmentsOutput};
pub use load_environment::GetEnvironment;
pub use save_environment::{SaveEnvironment, SaveEnvironmentInput};
pub use select_environment::SelectEnvironment;
