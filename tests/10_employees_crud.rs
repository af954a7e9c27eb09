mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn create_then_get_returns_same_record() -> Result<()> {
    let server = common::start_server().await?;

    let payload = json!({
        "first_name": "Ann",
        "middle_name": "Marie",
        "last_name": "Lee",
        "date_of_birth": "1988-02-29",
        "email": "ann@x.com",
        "is_active": false
    });
    let (status, created) = server.create(payload.clone()).await?;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", created);

    let id = created["id"].as_i64().expect("id assigned");
    let mut expected = payload;
    expected["id"] = json!(id);
    assert_eq!(created, expected);

    let (status, fetched) = server.get(&format!("/api/employees/{}", id)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, expected);
    Ok(())
}

#[tokio::test]
async fn create_defaults_active_and_null_middle_name() -> Result<()> {
    let server = common::start_server().await?;

    let (status, created) = server
        .create(json!({
            "first_name": "Cy",
            "last_name": "Ray",
            "date_of_birth": "2000-01-01",
            "email": "cy@x.com"
        }))
        .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["is_active"], json!(true));
    assert_eq!(created["middle_name"], json!(null));
    Ok(())
}

#[tokio::test]
async fn create_with_missing_fields_is_rejected() -> Result<()> {
    let server = common::start_server().await?;

    let (status, body) = server.create(json!({ "first_name": "Cy" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("last_name"), "body: {}", body);
    assert!(body["field_errors"]["email"].is_string());
    assert!(body["field_errors"]["date_of_birth"].is_string());

    let (_, list) = server.get("/api/employees").await?;
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn create_with_malformed_date_is_rejected() -> Result<()> {
    let server = common::start_server().await?;

    for raw in ["17/05/1990", "1990-5-17", "+1990-05-17", " 1990-05-17"] {
        let mut payload = common::employee("Cy", "Ray", "cy@x.com", true);
        payload["date_of_birth"] = json!(raw);
        let (status, body) = server.create(payload).await?;

        assert_eq!(status, StatusCode::BAD_REQUEST, "date {raw:?}");
        assert!(body["field_errors"]["date_of_birth"].is_string(), "body: {}", body);
    }

    let (_, body) = server.get("/api/employees").await?;
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn duplicate_email_on_create_is_conflict_and_count_unchanged() -> Result<()> {
    let server = common::start_server().await?;
    common::seed_example(&server).await?;

    let (status, body) = server
        .create(common::employee("Another", "Ann", "ann@x.com", true))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Email already exists" }));

    let (_, list) = server.get("/api/employees").await?;
    assert_eq!(common::ids(&list), vec![1, 2]);
    Ok(())
}

#[tokio::test]
async fn get_unknown_id_is_404() -> Result<()> {
    let server = common::start_server().await?;

    let (status, body) = server.get("/api/employees/999").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Employee not found" }));

    let (status, _) = server.get("/api/employees/not-a-number").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn partial_update_leaves_other_fields_untouched() -> Result<()> {
    let server = common::start_server().await?;

    let (_, created) = server
        .create(json!({
            "first_name": "Ann",
            "middle_name": "Marie",
            "last_name": "Lee",
            "date_of_birth": "1990-05-17",
            "email": "ann@x.com"
        }))
        .await?;
    let path = format!("/api/employees/{}", created["id"]);

    let (status, updated) = server.put(&path, json!({ "last_name": "Park" })).await?;
    assert_eq!(status, StatusCode::OK);

    let mut expected = created.clone();
    expected["last_name"] = json!("Park");
    assert_eq!(updated, expected);

    let (_, fetched) = server.get(&path).await?;
    assert_eq!(fetched, expected);
    Ok(())
}

#[tokio::test]
async fn update_can_clear_middle_name_and_reparse_date() -> Result<()> {
    let server = common::start_server().await?;

    let (_, created) = server
        .create(json!({
            "first_name": "Ann",
            "middle_name": "Marie",
            "last_name": "Lee",
            "date_of_birth": "1990-05-17",
            "email": "ann@x.com"
        }))
        .await?;
    let path = format!("/api/employees/{}", created["id"]);

    let (status, updated) = server
        .put(&path, json!({ "middle_name": null, "date_of_birth": "1991-12-31", "is_active": false }))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["middle_name"], json!(null));
    assert_eq!(updated["date_of_birth"], json!("1991-12-31"));
    assert_eq!(updated["is_active"], json!(false));
    assert_eq!(updated["first_name"], json!("Ann"));
    Ok(())
}

#[tokio::test]
async fn update_rejections_leave_record_unchanged() -> Result<()> {
    let server = common::start_server().await?;
    common::seed_example(&server).await?;
    let (_, before) = server.get("/api/employees/2").await?;

    // Email collision with Ann
    let (status, body) = server
        .put("/api/employees/2", json!({ "first_name": "Bob", "email": "ann@x.com" }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Email already exists" }));

    // Malformed date
    let (status, _) = server
        .put("/api/employees/2", json!({ "first_name": "Bob", "date_of_birth": "soon" }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Required field nulled
    let (status, _) = server
        .put("/api/employees/2", json!({ "first_name": null }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, after) = server.get("/api/employees/2").await?;
    assert_eq!(after, before);
    Ok(())
}

#[tokio::test]
async fn update_unknown_id_is_404() -> Result<()> {
    let server = common::start_server().await?;

    let (status, body) = server.put("/api/employees/5", json!({ "first_name": "X" })).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "The employee was not found" }));
    Ok(())
}

#[tokio::test]
async fn delete_confirms_with_name_and_then_get_is_404() -> Result<()> {
    let server = common::start_server().await?;
    common::seed_example(&server).await?;

    let (status, body) = server.delete("/api/employees/2").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Employee named Bo Han with id 2 deleted." }));

    let (status, _) = server.get("/api/employees/2").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = server.delete("/api/employees/2").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Employee not found for deletion" }));
    Ok(())
}

#[tokio::test]
async fn concurrent_creates_for_same_email_yield_one_success() -> Result<()> {
    let server = common::start_server().await?;

    let a = server.create(common::employee("Ann", "Lee", "same@x.com", true));
    let b = server.create(common::employee("Bo", "Han", "same@x.com", false));
    let (ra, rb) = tokio::join!(a, b);

    let mut statuses = vec![ra?.0, rb?.0];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::BAD_REQUEST]);

    let (_, list) = server.get("/api/employees").await?;
    assert_eq!(list.as_array().map(|a| a.len()), Some(1));
    Ok(())
}
