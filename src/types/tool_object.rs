use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};
use schemars::schema::{Schema, SchemaObject};
use schemars::{JsonSchema, schema_for};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::tool::{AsyncTool, AsyncToolWrapper, Tool};

type BoxedTool<C> = Box<dyn AsyncTool<Context = C>>;
type Deserializer<C> =
    Box<dyn Fn(&str) -> Result<BoxedTool<C>, serde_json::Error> + Send + Sync>;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("tool '{0}' is missing a schema description")]
    MissingDescription(String),
    #[error("could not convert schema to json")]
    JsonSerialization(#[from] serde_json::Error),
}

/// A registered tool: its declared schema plus a closure that turns the
/// model's argument JSON back into the typed parameter struct.
pub struct ToolObject<C> {
    pub name: String,
    pub description: String,
    pub json_schema: Value,
    deserializer: Deserializer<C>,
}

impl<C> std::fmt::Debug for ToolObject<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolObject")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("json_schema", &self.json_schema)
            .finish_non_exhaustive()
    }
}

impl<C> ToolObject<C> {
    pub fn try_deserialize(&self, data: &str) -> Result<BoxedTool<C>, serde_json::Error> {
        (self.deserializer)(data)
    }

    pub fn from_async_tool<T>() -> Result<Self, ValidationError>
    where
        T: AsyncTool<Context = C> + JsonSchema + DeserializeOwned + Default + 'static,
    {
        let name = T::default().name();
        Self::build::<T>(
            name,
            Box::new(|data| {
                serde_json::from_str::<T>(data).map(|tool| Box::new(tool) as BoxedTool<C>)
            }),
        )
    }

    pub fn from_sync_tool<T>() -> Result<Self, ValidationError>
    where
        T: Tool<Context = C> + JsonSchema + DeserializeOwned + Default + Send + Sync + 'static,
    {
        let name = T::default().name();
        Self::build::<T>(
            name,
            Box::new(|data| {
                serde_json::from_str::<T>(data)
                    .map(|tool| Box::new(AsyncToolWrapper(tool)) as BoxedTool<C>)
            }),
        )
    }

    fn build<T: JsonSchema>(
        name: &'static str,
        deserializer: Deserializer<C>,
    ) -> Result<Self, ValidationError> {
        let schema = schema_for!(T);
        let description = validate_tool_schema(name, &schema.schema)?;
        let json_schema = serde_json::to_value(&schema)?;
        Ok(Self {
            name: name.to_string(),
            description,
            json_schema,
            deserializer,
        })
    }
}

impl<C> From<&ToolObject<C>> for ChatCompletionTool {
    fn from(value: &ToolObject<C>) -> Self {
        Self {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: value.name.clone(),
                description: Some(value.description.clone()),
                parameters: Some(value.json_schema.clone()),
                strict: None,
            },
        }
    }
}

// Every level of the schema must carry a description, so what the model is
// told always matches what the params struct declares.
fn validate_tool_schema(name: &str, schema: &SchemaObject) -> Result<String, ValidationError> {
    let description = schema
        .metadata
        .as_deref()
        .and_then(|metadata| metadata.description.as_deref())
        .ok_or_else(|| ValidationError::MissingDescription(name.to_string()))?
        .to_string();

    if let Some(object) = schema.object.as_deref() {
        for sub_schema in object.properties.values() {
            if let Schema::Object(sub_schema_object) = sub_schema {
                validate_tool_schema(name, sub_schema_object)?;
            }
        }
    }

    Ok(description)
}
