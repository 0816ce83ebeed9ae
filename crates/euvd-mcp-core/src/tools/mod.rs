//! Tool management module
//!
//! Tools are declared once, in the catalog, and bound to handlers at startup.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  MCP host                                   │
//! └─────────────────────────────────────────────┘
//!           │
//!           │ tools/list, tools/call
//!           ▼
//! ┌─────────────────────────────────────────────┐
//! │  ToolRegistry                               │
//! │                                             │
//! │  - Looks up the handler by name             │
//! │  - Validates arguments (ParamSchema)        │
//! │  - Runs the handler                         │
//! └─────────────────────────────────────────────┘
//!           │
//!           │ RemoteRequest
//!           ▼
//! ┌─────────────────────────────────────────────┐
//! │  EuvdClient → euvdservices.enisa.europa.eu  │
//! └─────────────────────────────────────────────┘
//! ```

mod catalog;
mod handlers;
mod registry;
mod schema;

pub use catalog::{definition, names, ToolDefinition, ToolInfo, ToolKind, CATALOG};
pub use handlers::{envelope_for, handler_for, FeedTool, HandlerError, LookupTool, SearchTool, ToolHandler};
pub use registry::{DispatchError, RegistryError, RegistryResult, ToolRegistry};
pub use schema::{
    FieldKind, FieldSpec, ParamSchema, ValidatedArgs, ValidationError, Violation, ViolationKind,
};
