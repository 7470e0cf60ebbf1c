use chrono::Local;
use schemars::JsonSchema;
use serde::Deserialize;

use super::ToolContext;
use crate::types::Tool;

#[derive(Debug, Deserialize, JsonSchema, Default)]
#[schemars(description = "Get the current time as HH:MM:SS")]
pub struct GetTime {}

impl Tool for GetTime {
    type Context = ToolContext;

    fn name(&self) -> &'static str {
        "get_time"
    }

    fn apply(&self, _: Self::Context) -> String {
        current_time()
    }
}

fn current_time() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
