use std::sync::Arc;

use factotum::Config;
use factotum::tools::{ToolContext, assistant_toolset};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context(config: Config) -> ToolContext {
    ToolContext::new(Arc::new(config)).unwrap()
}

async fn call(ctx: ToolContext, name: &str, args: &str) -> String {
    assistant_toolset()
        .try_tool_call(ctx, name, args)
        .await
        .unwrap()
        .unwrap()
}

fn search_body(titles: &[String]) -> serde_json::Value {
    serde_json::json!({
        "batchcomplete": "",
        "query": {
            "search": titles
                .iter()
                .map(|title| serde_json::json!({ "ns": 0, "title": title }))
                .collect::<Vec<_>>()
        }
    })
}

#[tokio::test]
async fn wikipedia_titles_returns_a_json_array_of_titles() {
    let server = MockServer::start().await;
    let titles = vec![
        "Duck".to_string(),
        "Ducks, Newburyport".to_string(),
        "Rubber duck".to_string(),
    ];
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("srsearch", "intitle:ducks"))
        .and(query_param("srlimit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&titles)))
        .mount(&server)
        .await;

    let config = Config {
        wikipedia_api: format!("{}/w/api.php", server.uri()),
        ..Config::default()
    };
    let out = call(context(config), "wikipedia_titles", r#"{"keyword":"ducks"}"#).await;
    let parsed: Vec<String> = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, titles);
}

#[tokio::test]
async fn wikipedia_titles_caps_at_twenty() {
    let server = MockServer::start().await;
    let titles: Vec<String> = (1..=25).map(|i| format!("Title {i}")).collect();
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&titles)))
        .mount(&server)
        .await;

    let config = Config {
        wikipedia_api: format!("{}/w/api.php", server.uri()),
        ..Config::default()
    };
    let out = call(context(config), "wikipedia_titles", r#"{"keyword":"title"}"#).await;
    let parsed: Vec<String> = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.len(), 20);
    assert_eq!(parsed[0], "Title 1");
}

#[tokio::test]
async fn wikipedia_titles_reports_zero_hits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&[])))
        .mount(&server)
        .await;

    let config = Config {
        wikipedia_api: format!("{}/w/api.php", server.uri()),
        ..Config::default()
    };
    let out = call(context(config), "wikipedia_titles", r#"{"keyword":"xyzzy"}"#).await;
    assert_eq!(out, "No page titles found for 'xyzzy'.");
}

#[tokio::test]
async fn wikipedia_titles_requires_a_keyword() {
    // No server: an empty keyword never leaves the process.
    let out = call(
        context(Config::default()),
        "wikipedia_titles",
        r#"{"keyword":""}"#,
    )
    .await;
    assert_eq!(out, "No query provided.");
}

#[tokio::test]
async fn wikipedia_search_returns_the_extract() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", "extracts"))
        .and(query_param("titles", "Duck"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": {
                "pages": {
                    "37674": {
                        "pageid": 37674,
                        "title": "Duck",
                        "extract": "The duck is a waterbird."
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    let config = Config {
        wikipedia_api: format!("{}/w/api.php", server.uri()),
        ..Config::default()
    };
    let out = call(context(config), "wikipedia_search", r#"{"query":"Duck"}"#).await;
    assert_eq!(out, "The duck is a waterbird.");
}

#[tokio::test]
async fn wikipedia_search_explains_a_missing_extract() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": { "pages": { "-1": { "title": "Xyzzy" } } }
        })))
        .mount(&server)
        .await;

    let config = Config {
        wikipedia_api: format!("{}/w/api.php", server.uri()),
        ..Config::default()
    };
    let out = call(context(config), "wikipedia_search", r#"{"query":"Xyzzy"}"#).await;
    assert_eq!(out, "No summary found for 'Xyzzy'.");
}

#[tokio::test]
async fn unknown_location_never_reaches_the_forecast_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Nowhere"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config {
        geocoding_api: format!("{}/v1/search", server.uri()),
        forecast_api: format!("{}/v1/forecast", server.uri()),
        ..Config::default()
    };
    let out = call(context(config), "get_weather", r#"{"location":"Nowhere"}"#).await;
    assert!(out.contains("Nowhere"), "not explanatory: {out}");
    server.verify().await;
}

#[tokio::test]
async fn renders_a_seven_day_forecast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{
                "id": 4671654,
                "name": "Austin",
                "latitude": 30.2672,
                "longitude": -97.7431,
                "timezone": "America/Chicago"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("temperature_unit", "fahrenheit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "daily": {
                "time": ["2026-08-07", "2026-08-08", "2026-08-09", "2026-08-10",
                         "2026-08-11", "2026-08-12", "2026-08-13"],
                "weathercode": [0, 1, 2, 3, 61, 95, 0],
                "temperature_2m_max": [101.3, 99.0, 97.5, 95.2, 90.0, 88.8, 94.1],
                "temperature_2m_min": [78.1, 77.0, 76.2, 75.9, 74.0, 73.3, 75.5]
            }
        })))
        .mount(&server)
        .await;

    let config = Config {
        geocoding_api: format!("{}/v1/search", server.uri()),
        forecast_api: format!("{}/v1/forecast", server.uri()),
        ..Config::default()
    };
    let out = call(context(config), "get_weather", r#"{"location":"Austin"}"#).await;
    assert!(
        out.starts_with("7-Day forecast for Austin (timezone: America/Chicago):"),
        "unexpected header: {out}"
    );
    assert_eq!(out.lines().filter(|line| line.contains("°F")).count(), 7);
    assert!(out.contains("2026-08-11: Slight rain, 90.0°F / 74.0°F"));
}

#[tokio::test]
async fn empty_location_short_circuits() {
    let out = call(
        context(Config::default()),
        "get_weather",
        r#"{"location":""}"#,
    )
    .await;
    assert_eq!(out, "Location not specified.");
}

#[tokio::test]
async fn coder_llm_uses_the_configured_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({ "model": "test-coder" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 0,
            "model": "test-coder",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "fn main() {}" },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        api_base: server.uri(),
        coder_model: "test-coder".to_string(),
        ..Config::default()
    };
    let out = call(
        context(config),
        "coder_llm",
        r#"{"model":"someone-else","message":"write main"}"#,
    )
    .await;
    assert_eq!(out, "fn main() {}");
    server.verify().await;
}
