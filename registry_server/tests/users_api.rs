mod support;

use serde_json::Value;

// Tests share one server, so assertions avoid depending on exact ids.

#[tokio::test]
async fn test_created_user_is_listed() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();
    let email = format!("listed-{}@example.com", std::process::id());

    let res = client
        .post(format!("{base_url}/api/users"))
        .json(&serde_json::json!({ "name": "Listed", "email": email }))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let created: Value = res.json().await.expect("json body");
    assert!(created["id"].as_u64().is_some());

    let users: Vec<Value> = client
        .get(format!("{base_url}/api/users"))
        .send()
        .await
        .expect("request should succeed")
        .json()
        .await
        .expect("json body");

    assert!(users.iter().any(|user| user["email"] == email.as_str()));
}

#[tokio::test]
async fn test_delete_unknown_user_reports_success() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();

    let res = client
        .delete(format!("{base_url}/api/users/999999"))
        .send()
        .await
        .expect("request should succeed");

    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let payload: Value = res.json().await.expect("json body");
    assert_eq!(payload["message"], "User deleted");
}

#[tokio::test]
async fn test_sample_users_are_seeded() {
    let base_url = support::ensure_server();

    let users: Vec<Value> = reqwest::get(format!("{base_url}/api/users"))
        .await
        .expect("request should succeed")
        .json()
        .await
        .expect("json body");

    assert!(users.iter().any(|user| user["name"] == "John Doe"));
}
