use std::collections::HashMap;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use super::ToolContext;
use crate::types::AsyncTool;

const TITLE_LIMIT: usize = 20;

#[derive(Debug, Deserialize, JsonSchema, Default)]
#[schemars(
    description = "List Wikipedia page titles containing the keyword. Send a single keyword only."
)]
pub struct WikipediaTitles {
    #[schemars(description = "Keyword to match against page titles, e.g. ducks")]
    pub keyword: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: SearchQuery,
}

#[derive(Deserialize, Default)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    title: String,
}

#[async_trait]
impl AsyncTool for WikipediaTitles {
    type Context = ToolContext;

    fn name(&self) -> &'static str {
        "wikipedia_titles"
    }

    async fn apply(&self, ctx: ToolContext) -> anyhow::Result<String> {
        if self.keyword.is_empty() {
            return Ok("No query provided.".to_string());
        }
        let intitle = format!("intitle:{}", self.keyword);
        let response = ctx
            .http
            .get(&ctx.config.wikipedia_api)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", intitle.as_str()),
                ("srlimit", "20"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;
        let data: SearchResponse = response.json().await?;

        if data.query.search.is_empty() {
            return Ok(format!("No page titles found for '{}'.", self.keyword));
        }
        let titles: Vec<&str> = data
            .query
            .search
            .iter()
            .take(TITLE_LIMIT)
            .map(|hit| hit.title.as_str())
            .collect();
        Ok(serde_json::to_string_pretty(&titles)?)
    }
}

#[derive(Debug, Deserialize, JsonSchema, Default)]
#[schemars(
    description = "Fetch a short plain-text summary of a Wikipedia page. The query must be an exact title returned by wikipedia_titles."
)]
pub struct WikipediaSearch {
    #[schemars(description = "Exact page title, as returned by wikipedia_titles")]
    pub query: String,
}

#[derive(Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    query: ExtractQuery,
}

#[derive(Deserialize, Default)]
struct ExtractQuery {
    #[serde(default)]
    pages: HashMap<String, ExtractPage>,
}

#[derive(Deserialize)]
struct ExtractPage {
    #[serde(default)]
    extract: String,
}

#[async_trait]
impl AsyncTool for WikipediaSearch {
    type Context = ToolContext;

    fn name(&self) -> &'static str {
        "wikipedia_search"
    }

    async fn apply(&self, ctx: ToolContext) -> anyhow::Result<String> {
        let response = ctx
            .http
            .get(&ctx.config.wikipedia_api)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", ""),
                ("explaintext", ""),
                ("format", "json"),
                ("redirects", ""),
                ("titles", self.query.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let data: ExtractResponse = response.json().await?;

        match data.query.pages.into_values().next() {
            None => Ok(format!("No Wikipedia page found for '{}'.", self.query)),
            Some(page) if page.extract.is_empty() => {
                Ok(format!("No summary found for '{}'.", self.query))
            }
            Some(page) => Ok(page.extract),
        }
    }
}
