mod tool;
mod tool_object;
mod toolset;

pub use tool::{AsyncTool, AsyncToolWrapper, Tool};
pub use tool_object::{ToolObject, ValidationError};
pub use toolset::{ToolCallError, ToolSet, ToolSetCreationError};
