use campaign_crew::domain::errors::ProviderError;
use campaign_crew::domain::ports::SearchTool;
use campaign_crew::infrastructure::search::{TavilyClient, TavilyClientConfig, TavilyError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, max_results: u32) -> TavilyClient {
    TavilyClient::new(TavilyClientConfig {
        api_key: "tvly-test-key".to_string(),
        base_url: server.uri(),
        max_results,
        search_depth: "basic".to_string(),
        timeout_secs: 10,
    })
    .unwrap()
}

fn results(count: usize) -> serde_json::Value {
    let items: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "title": format!("Result {i}"),
                "url": format!("https://example.com/{i}"),
                "content": format!("Snippet {i}"),
                "score": 0.9
            })
        })
        .collect();
    serde_json::json!({ "query": "wearables", "results": items })
}

#[tokio::test]
async fn test_search_sends_query_and_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("authorization", "Bearer tvly-test-key"))
        .and(body_json(serde_json::json!({
            "query": "eco smartwatch buyers",
            "max_results": 2,
            "search_depth": "basic"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(results(2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hits = client_for(&mock_server, 2)
        .search("eco smartwatch buyers")
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Result 1");
    assert_eq!(hits[1].url, "https://example.com/2");
}

#[tokio::test]
async fn test_search_caps_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results(5)))
        .mount(&mock_server)
        .await;

    let hits = client_for(&mock_server, 2).query("wearables").await.unwrap();
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn test_empty_results_are_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results(0)))
        .mount(&mock_server)
        .await;

    let hits = client_for(&mock_server, 2).query("nothing").await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_rate_limit_is_transient() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server, 2).search("wearables").await.unwrap_err();
    assert!(matches!(err, ProviderError::RateLimited(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_bad_key_is_permanent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server, 2).query("wearables").await.unwrap_err();
    assert!(matches!(err, TavilyError::Unauthorized));
    assert!(!ProviderError::from(err).is_transient());
}

#[tokio::test]
async fn test_malformed_body_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server, 2).query("wearables").await.unwrap_err();
    assert!(matches!(err, TavilyError::MalformedResponse(_)));
}
