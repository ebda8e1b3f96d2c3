use gt_price_resolver::config::{
    DiscordConfig, FilterConfig, GeminiConfig, ResolverConfig, ServerConfig,
};
use gt_price_resolver::{PriceResolver, PriceType, ResolverError};
use httpmock::prelude::*;
use serde_json::json;

const GUILD: &str = "4242";
const SEARCH_PATH: &str = "/guilds/4242/messages/search";
const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";

fn config_for(server: &MockServer) -> ResolverConfig {
    let mut discord = DiscordConfig::new("test-token");
    discord.api_base = server.base_url();
    discord.guild_id = GUILD.to_string();

    let mut gemini = GeminiConfig::new("test-key");
    gemini.api_base = server.base_url();

    ResolverConfig {
        discord,
        gemini,
        filter: FilterConfig::default(),
        server: ServerConfig::default(),
    }
}

fn gemini_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_dark_blade_end_to_end() {
    let server = MockServer::start();

    let search_mock = server.mock(|when, then| {
        when.method(GET)
            .path(SEARCH_PATH)
            .query_param("content", "Dark Blade")
            .header("authorization", "test-token")
            .header("user-agent", "Mozilla/5.0");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "total_results": 1,
                "messages": [[{"id": "1", "content": "dark blade 150 wl\nselling fish"}]]
            }));
    });

    let generate_mock = server.mock(|when, then| {
        when.method(POST)
            .path(GENERATE_PATH)
            .header("x-goog-api-key", "test-key")
            .body_contains("itnm: Dark Blade\\ndark blade 150 wl")
            .body_contains("systemInstruction");
        then.status(200).json_body(gemini_reply(
            r#"{"Item_Name":"Dark Blade","item_price":150,"type":"each"}"#,
        ));
    });

    let resolver = PriceResolver::from_config(&config_for(&server)).unwrap();
    let response = resolver.resolve("Dark Blade").await.unwrap();

    search_mock.assert();
    generate_mock.assert();
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "itemName": "Dark Blade",
            "itemPrice": 150,
            "priceInDisplayUnits": "1 DL 50 WL",
            "type": "each"
        })
    );
}

#[tokio::test]
async fn test_fenced_model_output_is_accepted() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(SEARCH_PATH);
        then.status(200).json_body(json!({
            "messages": [
                [{"content": "magic egg 4/1 wl"}],
                [{"content": "selling Magic Egg 5/1"}]
            ]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(gemini_reply(
            "```json\n{\"Item_Name\":\"Magic Egg\",\"item_price\":4,\"priceindl\":\"4 WL\",\"type\":\"per\"}\n```",
        ));
    });

    let resolver = PriceResolver::from_config(&config_for(&server)).unwrap();
    let response = resolver.resolve("magic egg").await.unwrap();

    assert_eq!(response.item_name, "Magic Egg");
    assert_eq!(response.price_type, PriceType::Per);
    assert_eq!(response.price_in_display_units, None);
}

#[tokio::test]
async fn test_empty_search_is_no_match() {
    let server = MockServer::start();

    let search_mock = server.mock(|when, then| {
        when.method(GET).path(SEARCH_PATH);
        then.status(200).json_body(json!({"messages": [], "total_results": 0}));
    });
    let generate_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(gemini_reply("{}"));
    });

    let resolver = PriceResolver::from_config(&config_for(&server)).unwrap();
    let err = resolver.resolve("Dark Blade").await.unwrap_err();

    search_mock.assert();
    generate_mock.assert_hits(0);
    assert!(matches!(err, ResolverError::NoMatch { .. }));
}

#[tokio::test]
async fn test_unrelated_chatter_is_no_match() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(SEARCH_PATH);
        then.status(200).json_body(json!({
            "messages": [[{"content": "buying angel wings 20 wl\nanyone selling fish? 3/1"}]]
        }));
    });

    let resolver = PriceResolver::from_config(&config_for(&server)).unwrap();
    let err = resolver.resolve("Dark Blade").await.unwrap_err();

    assert!(matches!(err, ResolverError::NoMatch { .. }));
}

#[tokio::test]
async fn test_search_unauthorized_is_upstream() {
    let server = MockServer::start();

    let search_mock = server.mock(|when, then| {
        when.method(GET).path(SEARCH_PATH);
        then.status(401).json_body(json!({"message": "401: Unauthorized", "code": 0}));
    });

    let resolver = PriceResolver::from_config(&config_for(&server)).unwrap();
    let err = resolver.resolve("Dark Blade").await.unwrap_err();

    search_mock.assert();
    assert!(matches!(err, ResolverError::Upstream { .. }));
}

#[tokio::test]
async fn test_model_failure_is_upstream() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(SEARCH_PATH);
        then.status(200)
            .json_body(json!({"messages": [[{"content": "dark blade 150 wl"}]]}));
    });
    let generate_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(429)
            .json_body(json!({"error": {"code": 429, "status": "RESOURCE_EXHAUSTED"}}));
    });

    let resolver = PriceResolver::from_config(&config_for(&server)).unwrap();
    let err = resolver.resolve("Dark Blade").await.unwrap_err();

    generate_mock.assert();
    assert!(matches!(err, ResolverError::Upstream { .. }));
}

#[tokio::test]
async fn test_missing_price_is_malformed() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(SEARCH_PATH);
        then.status(200)
            .json_body(json!({"messages": [[{"content": "dark blade 150 wl"}]]}));
    });
    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200)
            .json_body(gemini_reply(r#"{"Item_Name":"Dark Blade","type":"each"}"#));
    });

    let resolver = PriceResolver::from_config(&config_for(&server)).unwrap();
    let err = resolver.resolve("Dark Blade").await.unwrap_err();

    assert!(matches!(err, ResolverError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_unreachable_search_is_upstream() {
    let server = MockServer::start();
    let mut config = config_for(&server);
    config.discord.api_base = "http://127.0.0.1:9".to_string();
    config.discord.timeout_seconds = Some(2);

    let generate_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(gemini_reply("{}"));
    });

    let resolver = PriceResolver::from_config(&config).unwrap();
    let err = resolver.resolve("Dark Blade").await.unwrap_err();

    generate_mock.assert_hits(0);
    assert!(matches!(err, ResolverError::Upstream { .. }));
}

#[tokio::test]
async fn test_null_search_entries_are_skipped() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(SEARCH_PATH);
        then.status(200).json_body(json!({
            "messages": [
                null,
                [null, {"content": "dark blade 999 wl"}],
                [{"content": "dark blade 150 wl"}]
            ]
        }));
    });
    let generate_mock = server.mock(|when, then| {
        when.method(POST)
            .path(GENERATE_PATH)
            .body_contains("itnm: Dark Blade\\ndark blade 150 wl\"");
        then.status(200).json_body(gemini_reply(
            r#"{"Item_Name":"Dark Blade","item_price":150,"type":"each"}"#,
        ));
    });

    let resolver = PriceResolver::from_config(&config_for(&server)).unwrap();
    let response = resolver.resolve("Dark Blade").await.unwrap();

    generate_mock.assert();
    assert_eq!(response.price_in_display_units.as_deref(), Some("1 DL 50 WL"));
}

#[tokio::test]
async fn test_null_message_list_is_no_match() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(SEARCH_PATH);
        then.status(200).json_body(json!({"messages": null}));
    });

    let resolver = PriceResolver::from_config(&config_for(&server)).unwrap();
    let err = resolver.resolve("Dark Blade").await.unwrap_err();

    assert!(matches!(err, ResolverError::NoMatch { .. }));
}
