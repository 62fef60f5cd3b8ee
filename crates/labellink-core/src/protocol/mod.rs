//! Printer command protocol: status interpretation and label templating.

mod label;
mod status;

pub use label::label_template;
pub use status::{parse_status_reply, StatusInterpreter, STATUS_QUERY};
