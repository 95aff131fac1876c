mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn proxy_mirrors_server_listing_and_aggregates() -> Result<()> {
    let config = common::config();
    let server = common::spawn_server(&config).await?;
    let api = common::spawn_proxy(&config, &server.base_url).await?;
    let client = reqwest::Client::new();

    let direct: Value = client.get(server.employees_url()).send().await?.json().await?;
    let proxied: Value = client.get(api.employees_url()).send().await?.json().await?;
    assert_eq!(proxied["data"], direct["data"]);

    let direct: Value = client
        .get(server.url("topTenHighestEarningEmployeeNames"))
        .send()
        .await?
        .json()
        .await?;
    let proxied: Value = client
        .get(api.url("topTenHighestEarningEmployeeNames"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(proxied, direct);

    let res = client.get(api.url("highestSalary")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "470600");

    let health: Value = client.get(format!("{}/health", api.base_url)).send().await?.json().await?;
    assert_eq!(health["tier"], "api");
    assert!(health.get("records").is_none());
    Ok(())
}

#[tokio::test]
async fn writes_through_proxy_land_on_server() -> Result<()> {
    let config = common::config();
    let server = common::spawn_server(&config).await?;
    let api = common::spawn_proxy(&config, &server.base_url).await?;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(api.employees_url())
        .json(&json!({"name": "Proxy Person", "age": 40, "salary": 999999, "title": "Relay"}))
        .send()
        .await?
        .json()
        .await?;
    let id = created["data"]["id"].as_str().expect("id").to_string();

    let fetched: Value = client.get(server.url(&id)).send().await?.json().await?;
    assert_eq!(fetched["data"]["employee_name"], "Proxy Person");

    let found: Value = client.get(api.url("search/Proxy%20Person")).send().await?.json().await?;
    assert_eq!(found["data"][0]["id"], id.as_str());

    let res = client.delete(api.url(&id)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "Proxy Person");

    let res = client.get(server.url(&id)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = client
        .delete(api.employees_url())
        .json(&json!({"name": "Sonya Frost"}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"], true);
    Ok(())
}

#[tokio::test]
async fn proxy_passes_through_not_found_and_validation() -> Result<()> {
    let config = common::config();
    let server = common::spawn_server(&config).await?;
    let api = common::spawn_proxy(&config, &server.base_url).await?;
    let client = reqwest::Client::new();

    let missing = uuid::Uuid::new_v4().to_string();
    let res = client.get(api.url(&missing)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert!(body.get("data").is_none());

    let res = client.delete(api.url(&missing)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(api.employees_url())
        .json(&json!({"name": "", "age": 30, "salary": 0, "title": "t"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["field_errors"]["salary"], "must be greater than 0");
    assert_eq!(body["field_errors"]["name"], "must not be blank");
    Ok(())
}

#[tokio::test]
async fn proxy_reports_empty_upstream_as_not_found() -> Result<()> {
    let (config, _seed) = common::empty_seed_config()?;
    let server = common::spawn_server(&config).await?;
    let api = common::spawn_proxy(&config, &server.base_url).await?;

    let res = reqwest::get(api.url("highestSalary")).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() -> Result<()> {
    let config = common::config();
    let dead = format!("http://127.0.0.1:{}", common::unused_port()?);
    let api = common::spawn_proxy(&config, &dead).await?;

    let res = reqwest::get(api.employees_url()).await?;
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "BAD_GATEWAY");

    // Unparseable ids never reach the upstream
    let res = reqwest::get(api.url("not-a-uuid")).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
