mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn health_reports_tier_and_record_count() -> Result<()> {
    let server = common::spawn_server(&common::config()).await?;
    let body: Value = reqwest::get(format!("{}/health", server.base_url)).await?.json().await?;

    assert_eq!(body["status"], "UP");
    assert_eq!(body["tier"], "server");
    assert_eq!(body["records"], 15);

    let actuator = reqwest::get(format!("{}/actuator/health", server.base_url)).await?;
    assert_eq!(actuator.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn seeded_roster_answers_aggregates() -> Result<()> {
    let server = common::spawn_server(&common::config()).await?;
    let client = reqwest::Client::new();

    let list: Value = client.get(server.employees_url()).send().await?.json().await?;
    let records = list["data"].as_array().expect("data array");
    assert_eq!(records.len(), 15);
    assert_eq!(records[0]["employee_name"], "Tiger Nixon");
    assert_eq!(records[0]["employee_email"], "tiger.nixon@company.com");

    let highest = client.get(server.url("highestSalary")).send().await?;
    assert_eq!(highest.status(), StatusCode::OK);
    assert_eq!(highest.text().await?, "470600");

    let top: Vec<String> = client
        .get(server.url("topTenHighestEarningEmployeeNames"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(top.len(), 10);
    assert_eq!(top[0], "Charde Marshall");
    assert_eq!(top[1], "Cedric Kelly");
    assert_eq!(top[7], "Haley Kennedy");
    assert_eq!(top[9], "Garrett Winters");
    Ok(())
}

#[tokio::test]
async fn search_is_case_sensitive_and_empty_matches_are_present() -> Result<()> {
    let server = common::spawn_server(&common::config()).await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("search/Gaines")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"][0]["employee_name"], "Jena Gaines");

    let res = client.get(server.url("search/gaines")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"], json!([]));

    let res = client.get(server.url("search/Regional%20Director")).send().await?;
    let body: Value = res.json().await?;
    assert_eq!(body["data"], json!([]), "search matches names, not titles");
    Ok(())
}

#[tokio::test]
async fn create_get_delete_lifecycle() -> Result<()> {
    let server = common::spawn_server(&common::config()).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.employees_url())
        .json(&json!({"name": "name1", "age": 25, "salary": 421520, "title": "title1"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let created: Value = res.json().await?;
    let id = created["data"]["id"].as_str().expect("id").to_string();
    assert_eq!(created["data"]["employee_email"], "name1@company.com");

    let fetched: Value = client.get(server.url(&id)).send().await?.json().await?;
    assert_eq!(fetched["data"], created["data"]);

    let list: Value = client.get(server.employees_url()).send().await?.json().await?;
    assert_eq!(list["data"].as_array().map(Vec::len), Some(16));

    let res = client.delete(server.url(&id)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "name1");

    let res = client.get(server.url(&id)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert!(body.get("data").is_none());

    let res = client.delete(server.url(&id)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "");
    Ok(())
}

#[tokio::test]
async fn invalid_create_is_rejected_without_side_effects() -> Result<()> {
    let server = common::spawn_server(&common::config()).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.employees_url())
        .json(&json!({"name": "Young", "age": 12, "salary": 0, "title": "Intern"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["field_errors"]["salary"], "must be greater than 0");
    assert_eq!(body["field_errors"]["age"], "must be between 16 and 75");

    let res = client
        .post(server.employees_url())
        .json(&json!({"age": 30, "salary": 10}))
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["field_errors"]["name"], "must not be null");
    assert_eq!(body["field_errors"]["title"], "must not be null");

    let list: Value = client.get(server.employees_url()).send().await?.json().await?;
    assert_eq!(list["data"].as_array().map(Vec::len), Some(15));
    Ok(())
}

#[tokio::test]
async fn delete_by_body_removes_first_name_match() -> Result<()> {
    let server = common::spawn_server(&common::config()).await?;
    let client = reqwest::Client::new();

    let res = client
        .delete(server.employees_url())
        .json(&json!({"name": "Airi Satou"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"], true);

    let body: Value = client.get(server.url("search/Airi")).send().await?.json().await?;
    assert_eq!(body["data"], json!([]));

    let body: Value = client
        .delete(server.employees_url())
        .json(&json!({"name": "Airi Satou"}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"], false);

    let res = client.delete(server.employees_url()).json(&json!({})).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn empty_store_has_no_highest_salary() -> Result<()> {
    let (config, _seed) = common::empty_seed_config()?;
    let server = common::spawn_server(&config).await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("highestSalary")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let top: Vec<String> = client
        .get(server.url("topTenHighestEarningEmployeeNames"))
        .send()
        .await?
        .json()
        .await?;
    assert!(top.is_empty());

    for salary in [100, 500, 250] {
        client
            .post(server.employees_url())
            .json(&json!({"name": format!("e{}", salary), "age": 30, "salary": salary, "title": "t"}))
            .send()
            .await?;
    }
    let res = client.get(server.url("highestSalary")).send().await?;
    assert_eq!(res.text().await?, "500");
    Ok(())
}
