use std::collections::HashMap;

use async_openai::types::ChatCompletionTool;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::tool::{AsyncTool, Tool};
use super::tool_object::{ToolObject, ValidationError};

#[derive(Debug, Error)]
pub enum ToolSetCreationError {
    #[error("invalid tool schema: {0}")]
    Validation(#[from] ValidationError),
    #[error("two or more tools are named '{0}'")]
    NameConflict(String),
}

#[derive(Debug, Error)]
pub enum ToolCallError {
    #[error("error deserializing tool arguments (possible hallucination): {0}")]
    Deserialization(serde_json::Error),
    #[error("tool '{0}' is not in the toolset")]
    NotFound(String),
}

/// Registry mapping tool names to schema-validated handlers. Registration
/// fails on name conflicts or undocumented schemas, so a toolset that
/// constructs is one whose declared schemas match their implementations.
#[derive(Debug, Default)]
pub struct ToolSet<C> {
    tools: HashMap<String, ToolObject<C>>,
}

impl<C> ToolSet<C> {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn add_tool<T>(self) -> Result<Self, ToolSetCreationError>
    where
        T: AsyncTool<Context = C> + JsonSchema + DeserializeOwned + Default + 'static,
    {
        self.insert(ToolObject::from_async_tool::<T>()?)
    }

    pub fn add_sync_tool<T>(self) -> Result<Self, ToolSetCreationError>
    where
        T: Tool<Context = C> + JsonSchema + DeserializeOwned + Default + Send + Sync + 'static,
    {
        self.insert(ToolObject::from_sync_tool::<T>()?)
    }

    fn insert(mut self, tool: ToolObject<C>) -> Result<Self, ToolSetCreationError> {
        if self.tools.contains_key(&tool.name) {
            return Err(ToolSetCreationError::NameConflict(tool.name));
        }
        self.tools.insert(tool.name.clone(), tool);
        Ok(self)
    }

    /// Dispatch one call. The outer error is a registry failure (unknown
    /// name, arguments that don't fit the declared schema); the inner
    /// result is the tool's own outcome.
    pub async fn try_tool_call(
        &self,
        context: C,
        tool_name: &str,
        json: &str,
    ) -> Result<anyhow::Result<String>, ToolCallError>
    where
        C: Send + 'static,
    {
        // Terse models send "" for zero-parameter tools.
        let json = if json.trim().is_empty() { "{}" } else { json };
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| ToolCallError::NotFound(tool_name.to_owned()))?
            .try_deserialize(json)
            .map_err(ToolCallError::Deserialization)?;
        Ok(tool.apply(context).await)
    }

    /// Tool definitions in wire format, in stable name order.
    pub fn definitions(&self) -> Vec<ChatCompletionTool> {
        let mut objects: Vec<_> = self.tools.values().collect();
        objects.sort_by(|a, b| a.name.cmp(&b.name));
        objects.into_iter().map(ChatCompletionTool::from).collect()
    }

    /// Name/description pairs in stable name order, for prompt assembly.
    pub fn describe(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<_> = self
            .tools
            .values()
            .map(|tool| (tool.name.as_str(), tool.description.as_str()))
            .collect();
        out.sort_unstable();
        out
    }
}
