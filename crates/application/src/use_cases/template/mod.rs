//! Request template use cases

mod delete_template;
mod list_templates;
mod load_template;
mod save_template;
mod send_template;
mod touch_template;

pub use delete_template::DeleteTemplate;
pub use list_templates::ListTemplates;
pub use load_template::GetTemplate;
pub use save_template::{SaveTemplate, SaveTemplateInput};
pub use send_template::{SendTemplate, SendTemplateInput};
pub use touch_template::TouchTemplate;
