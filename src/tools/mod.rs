mod calc;
mod clock;
mod coder;
mod dictionary;
mod weather;
mod wikipedia;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::config::Config;
use crate::types::ToolSet;

use calc::Calc;
use clock::GetTime;
use coder::CoderLlm;
use dictionary::DefineWord;
use weather::GetWeather;
use wikipedia::{WikipediaSearch, WikipediaTitles};

const USER_AGENT: &str = concat!("factotum/", env!("CARGO_PKG_VERSION"));

/// Shared state handed to every dispatch: one HTTP client and the resolved
/// configuration. Cloning is cheap, both fields are reference-counted.
#[derive(Clone)]
pub struct ToolContext {
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

impl ToolContext {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self { http, config })
    }
}

pub fn assistant_toolset() -> ToolSet<ToolContext> {
    ToolSet::new()
        .add_sync_tool::<GetTime>()
        .expect("get_time")
        .add_sync_tool::<Calc>()
        .expect("calc")
        .add_sync_tool::<DefineWord>()
        .expect("define_word")
        .add_tool::<WikipediaTitles>()
        .expect("wikipedia_titles")
        .add_tool::<WikipediaSearch>()
        .expect("wikipedia_search")
        .add_tool::<GetWeather>()
        .expect("get_weather")
        .add_tool::<CoderLlm>()
        .expect("coder_llm")
}
