use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use super::ToolContext;
use crate::types::AsyncTool;

#[derive(Debug, Deserialize, JsonSchema, Default)]
#[schemars(description = "Call the coding model with a single message")]
pub struct CoderLlm {
    #[schemars(description = "Model name to call")]
    pub model: String,
    #[schemars(description = "Message to send to the model")]
    pub message: String,
}

#[async_trait]
impl AsyncTool for CoderLlm {
    type Context = ToolContext;

    fn name(&self) -> &'static str {
        "coder_llm"
    }

    async fn apply(&self, ctx: ToolContext) -> anyhow::Result<String> {
        // The configured coder model wins over whatever name the caller
        // passed; the argument stays in the schema for compatibility.
        let model = ctx.config.coder_model.clone();
        debug!(requested = %self.model, using = %model, "coder_llm dispatch");

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(vec![ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage {
                    content: ChatCompletionRequestUserMessageContent::Text(self.message.clone()),
                    name: None,
                },
            )])
            .build()?;

        let client = Client::with_config(
            OpenAIConfig::new()
                .with_api_base(ctx.config.api_base.clone())
                .with_api_key(ctx.config.api_key.clone()),
        );
        let response = client.chat().create(request).await?;
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
