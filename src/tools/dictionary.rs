use schemars::JsonSchema;
use serde::Deserialize;

use super::ToolContext;
use crate::types::Tool;

#[derive(Debug, Deserialize, JsonSchema, Default)]
#[schemars(description = "Look up the definition of a given word in English.")]
pub struct DefineWord {
    #[schemars(description = "The word to define")]
    pub word: String,
}

impl Tool for DefineWord {
    type Context = ToolContext;

    fn name(&self) -> &'static str {
        "define_word"
    }

    // Stub lookup; there is no real dictionary backend.
    fn apply(&self, _: Self::Context) -> String {
        format!("'{}': A sample definition. [Replace with real logic]", self.word)
    }
}
