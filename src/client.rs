//! The conversation driver.
//!
//! Sends the session history plus tool definitions to the chat endpoint,
//! dispatches any requested tools, and loops until the model answers in
//! plain text or the per-turn call budget runs out.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessage,
    ChatCompletionRequestAssistantMessageContent, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessage, ChatCompletionRequestSystemMessageContent,
    ChatCompletionRequestToolMessage, ChatCompletionRequestToolMessageContent,
    ChatCompletionRequestUserMessage, ChatCompletionRequestUserMessageContent,
    ChatCompletionResponseMessage, CreateChatCompletionRequestArgs,
};
use tracing::debug;

use crate::config::Config;
use crate::io::read_user_input;
use crate::prompt::build_system_prompt;
use crate::tools::{ToolContext, assistant_toolset};
use crate::types::{ToolCallError, ToolSet};

/// What a single user turn produced.
#[derive(Debug)]
pub struct TurnOutcome {
    /// Final assistant text, or the partial content that accompanied the
    /// last ignored tool request.
    pub reply: String,
    /// Tool dispatch rounds performed this turn.
    pub tool_rounds: usize,
    /// True when the turn ended by hitting the call budget.
    pub budget_exhausted: bool,
}

pub struct ChatClient {
    inner: Client<OpenAIConfig>,
    toolset: ToolSet<ToolContext>,
    context: ToolContext,
    messages: Vec<ChatCompletionRequestMessage>,
    model: String,
    max_tool_calls: usize,
}

impl ChatClient {
    pub fn new(config: Config) -> Result<ChatClient> {
        let config = Arc::new(config);
        let inner = Client::with_config(
            OpenAIConfig::new()
                .with_api_base(config.api_base.clone())
                .with_api_key(config.api_key.clone()),
        );
        let toolset = assistant_toolset();
        let context = ToolContext::new(Arc::clone(&config))?;
        let messages = vec![ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(build_system_prompt(
                    &toolset,
                )),
                name: None,
            },
        )];
        Ok(ChatClient {
            inner,
            toolset,
            context,
            messages,
            model: config.model.clone(),
            max_tool_calls: config.max_tool_calls,
        })
    }

    /// Console loop. Ends on EOF or a case-insensitive `exit`.
    pub async fn chat(&mut self) -> Result<()> {
        loop {
            let Some(input) = read_user_input().await? else {
                break;
            };
            if input.eq_ignore_ascii_case("exit") {
                break;
            }
            match self.take_turn(input).await {
                Ok(outcome) if outcome.budget_exhausted => {
                    println!("(Hit maximum tool calls – ignoring further requests.)");
                    println!("Assistant (partial): {}", outcome.reply);
                }
                Ok(outcome) => println!("Assistant: {}", outcome.reply),
                // The turn is abandoned; history keeps whatever was
                // appended so far.
                Err(error) => eprintln!("Error: {error:#}"),
            }
        }
        println!("Goodbye!");
        Ok(())
    }

    /// Run one user turn to completion.
    pub async fn take_turn(&mut self, input: String) -> Result<TurnOutcome> {
        self.messages.push(ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(input),
                name: None,
            },
        ));

        let mut tool_rounds = 0;
        loop {
            let response = self.send_chat().await?;
            let content = response.content.clone().unwrap_or_default();
            let tool_calls = response.tool_calls.unwrap_or_default();

            if tool_calls.is_empty() {
                self.messages.push(ChatCompletionRequestMessage::Assistant(
                    ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            content.clone(),
                        )),
                        ..Default::default()
                    },
                ));
                return Ok(TurnOutcome {
                    reply: content,
                    tool_rounds,
                    budget_exhausted: false,
                });
            }

            if tool_rounds >= self.max_tool_calls {
                debug!("tool call budget of {} exhausted", self.max_tool_calls);
                return Ok(TurnOutcome {
                    reply: content,
                    tool_rounds,
                    budget_exhausted: true,
                });
            }
            tool_rounds += 1;
            debug!("tool round {tool_rounds}");

            self.messages.push(ChatCompletionRequestMessage::Assistant(
                ChatCompletionRequestAssistantMessage {
                    content: response
                        .content
                        .map(ChatCompletionRequestAssistantMessageContent::Text),
                    tool_calls: Some(tool_calls.clone()),
                    ..Default::default()
                },
            ));

            // Strictly sequential: one call at a time, in the order listed.
            for call in tool_calls {
                let result = self.dispatch(&call).await;
                debug!(tool = %call.function.name, result = %truncated(&result, 200), "tool result");
                self.messages.push(ChatCompletionRequestMessage::Tool(
                    ChatCompletionRequestToolMessage {
                        content: ChatCompletionRequestToolMessageContent::Text(result),
                        tool_call_id: call.id,
                    },
                ));
            }
        }
    }

    /// Execute a single requested call. Every failure mode is rendered as
    /// text for the conversation; none of them fails the turn.
    async fn dispatch(&self, call: &ChatCompletionMessageToolCall) -> String {
        let name = &call.function.name;
        debug!(tool = %name, args = %call.function.arguments, "model requested tool");
        match self
            .toolset
            .try_tool_call(self.context.clone(), name, &call.function.arguments)
            .await
        {
            Ok(Ok(result)) => result,
            Ok(Err(error)) => format!("Error: {error:#}"),
            Err(ToolCallError::NotFound(_)) => "Unknown tool call".to_string(),
            Err(ToolCallError::Deserialization(error)) => {
                format!("Invalid arguments for tool '{name}': {error}")
            }
        }
    }

    async fn send_chat(&self) -> Result<ChatCompletionResponseMessage> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(self.messages.clone())
            .tools(self.toolset.definitions())
            .build()?;

        let response = self
            .inner
            .chat()
            .create(request)
            .await
            .context("chat endpoint request failed")?;
        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| anyhow::anyhow!("chat endpoint returned no choices"))
    }

    /// Read-only view of the session history.
    pub fn history(&self) -> &[ChatCompletionRequestMessage] {
        &self.messages
    }
}

fn truncated(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}... [truncated]")
    }
}
