//! Application use cases (business logic orchestration).

pub mod environment;
pub mod template;

pub use environment::{
    DeleteEnvironment, GetEnvironment, ListEnvironments, ListEnvironmentsOutput, SaveEnvironment,
    SaveEnvironmentInput, SelectEnvironment,
};
pub use template::{
    DeleteTemplate, GetTemplate, ListTemplates, SaveTemplate, SaveTemplateInput, SendTemplate,
    SendTemplateInput, TouchTemplate,
};
