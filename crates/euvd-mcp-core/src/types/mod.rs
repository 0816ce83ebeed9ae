//! Protocol-neutral data model

mod tool;

pub use tool::{ToolInvocation, ToolResponse, ContentBlock, API_ERROR_PREFIX};
