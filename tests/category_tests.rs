use cms_api_rs::{ApiError, CategoryStatus, NewCategory, RequestOptions, ResourceService};
use mockito::Matcher;
use pretty_assertions::assert_eq;
use serde_json::json;


use test_helpers::{browser_client, mock_browser_client, MockTransport};

fn full_category(id: &str, title: &str, group: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "created": "2024-03-01T10:00:00Z",
        "group": group,
        "status": "CategoryStub",
        "description": {"blocks": [{"type": "paragraph", "text": "intro"}]},
        "items": [
            {"id": "i1", "title": "First", "order": 1},
            {"id": "i2", "title": "Second", "order": 2}
        ]
    })
}

#[tokio::test]
async fn test_service_resource_name() {
    let (client, _) = browser_client("http://cms.test");
    assert_eq!(client.categories().resource_name(), "category");
}

#[tokio::test]
async fn test_get_category_list() {
    let mut server = mockito::Server::new_async().await;
    let body = json!([
        {"id": "1", "title": "Rust", "created": "2024-01-01", "group": "Languages", "status": "CategoryFinished"},
        {"id": "2", "title": "Tokio", "created": "2024-01-02", "group": "Libraries", "status": "CategoryWIP"}
    ]);
    server
        .mock("GET", "/api/categories")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let (client, _) = browser_client(&server.url());
    let list = client.categories().get_category_list().await.unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[1].status, CategoryStatus::InProgress);
    assert_eq!(serde_json::to_value(&list).unwrap(), body);
}

#[tokio::test]
async fn test_get_category_list_empty() {
    let transport = MockTransport::new().respond(200, "[]").respond(200, "null");
    let (client, notifier) = mock_browser_client(transport);
    let categories = client.categories();

    assert!(categories.get_category_list().await.unwrap().is_empty());
    assert!(categories.get_category_list().await.unwrap().is_empty());
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn test_get_category_by_id() {
    let mut server = mockito::Server::new_async().await;
    let body = full_category("c7", "Async", "Guides");
    server
        .mock("GET", "/api/category/c7")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let (client, _) = browser_client(&server.url());
    let category = client.categories().get_category_by_id("c7").await.unwrap();

    assert_eq!(category.title, "Async");
    assert_eq!(category.status, CategoryStatus::ToBeWritten);
    assert_eq!(category.items.len(), 2);
    assert_eq!(serde_json::to_value(&category).unwrap(), body);
}

#[tokio::test]
async fn test_get_category_by_id_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/category/missing")
        .with_status(404)
        .with_body(r#"{"message":"Category not found"}"#)
        .create_async()
        .await;

    let (client, notifier) = browser_client(&server.url());
    let err = client.categories().get_category_by_id("missing").await.unwrap_err();

    assert!(err.is_not_found());
    let notifications = notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0].message,
        "Something went wrong, could not process \"get category\" request."
    );
}

#[tokio::test]
async fn test_get_category_by_id_with_skipped_not_found_is_silent() {
    let transport = MockTransport::new().respond(404, r#"{"message":"Category not found"}"#);
    let (client, notifier) = mock_browser_client(transport);

    let err = client
        .categories()
        .get_category_by_id_with("missing", RequestOptions::new().skip_error_codes([404]))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn test_get_category_list_with_custom_request_name() {
    let transport = MockTransport::new().respond(500, "");
    let (client, notifier) = mock_browser_client(transport);

    let err = client
        .categories()
        .get_category_list_with(RequestOptions::new().request_name("load sidebar"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(
        notifier.notifications()[0].message,
        "Something went wrong, could not process \"load sidebar\" request."
    );
}

#[tokio::test]
async fn test_unknown_fields_are_preserved() {
    let list_body = json!([
        {"id": "1", "title": "Rust", "created": "2024-01-01", "group": "Languages", "status": "CategoryWIP", "slug": "rust"}
    ]);
    let mut full_body = full_category("c9", "Rust", "Languages");
    full_body["slug"] = json!("rust");
    full_body["views"] = json!(12);

    let transport = MockTransport::new()
        .respond(200, &list_body.to_string())
        .respond(200, &full_body.to_string());
    let (client, _) = mock_browser_client(transport);
    let categories = client.categories();

    let list = categories.get_category_list().await.unwrap();
    assert_eq!(list[0].extra["slug"], json!("rust"));
    assert_eq!(serde_json::to_value(&list).unwrap(), list_body);

    let category = categories.get_category_by_id("c9").await.unwrap();
    assert_eq!(serde_json::to_value(&category).unwrap(), full_body);
}

#[tokio::test]
async fn test_invalid_id_is_rejected_before_dispatch() {
    let transport = MockTransport::new();
    let (client, notifier) = mock_browser_client(transport.clone());
    let categories = client.categories();

    for id in ["", "  ", "a/b", "x?y=1", ".."] {
        let err = categories.get_category_by_id(id).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter(_)), "id {:?} gave {:?}", id, err);
    }
    assert!(transport.requests().is_empty());
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let create = server
        .mock("POST", "/api/category")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("title".into(), "T".into()),
            Matcher::UrlEncoded("group".into(), "G".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#""X""#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/category/X")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(full_category("X", "T", "G").to_string())
        .create_async()
        .await;

    let (client, _) = browser_client(&server.url());
    let categories = client.categories();

    let id = categories.create_category(NewCategory::new("T", "G")).await.unwrap();
    assert_eq!(id, "X");

    let category = categories.get_category_by_id(&id).await.unwrap();
    assert_eq!(category.title, "T");
    assert_eq!(category.group, "G");
    create.assert_async().await;
}

#[tokio::test]
async fn test_create_category_accepts_numeric_and_plain_ids() {
    let transport = MockTransport::new().respond(200, "17").respond(200, "plain-id");
    let (client, _) = mock_browser_client(transport.clone());
    let categories = client.categories();

    assert_eq!(categories.create_category(NewCategory::new("A", "B")).await.unwrap(), "17");
    assert_eq!(categories.create_category(NewCategory::new("A", "B")).await.unwrap(), "plain-id");

    let requests = transport.requests();
    assert_eq!(requests[0].method, reqwest::Method::POST);
    assert_eq!(requests[0].url.as_str(), "http://cms.test/api/category?title=A&group=B");
    assert!(requests[0].body.is_none());
}

#[tokio::test]
async fn test_create_category_keeps_id_text() {
    let transport = MockTransport::new()
        .respond(200, "1e3")
        .respond(200, "123456789012345678901234567890")
        .respond(404, "");
    let (client, _) = mock_browser_client(transport.clone());
    let categories = client.categories();

    let id = categories.create_category(NewCategory::new("A", "B")).await.unwrap();
    assert_eq!(id, "1e3");
    assert_eq!(
        categories.create_category(NewCategory::new("A", "B")).await.unwrap(),
        "123456789012345678901234567890"
    );

    categories.get_category_by_id(&id).await.unwrap_err();
    assert_eq!(transport.requests()[2].url.as_str(), "http://cms.test/api/category/1e3");
}

#[tokio::test]
async fn test_create_category_validation_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/category")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"message":"title is required"}"#)
        .create_async()
        .await;

    let (client, notifier) = browser_client(&server.url());
    let err = client
        .categories()
        .create_category(NewCategory::new("", "G"))
        .await
        .unwrap_err();

    assert!(err.is_validation_error());
    assert_eq!(err.response_body(), Some(&json!({"message": "title is required"})));
    assert_eq!(notifier.count(), 1);
    assert_eq!(notifier.notifications()[0].details.response_code, Some(400));
}

#[tokio::test]
async fn test_update_category_info_sends_wire_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/category/42/info")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("title".into(), "New Title".into()),
            Matcher::UrlEncoded("group".into(), "G".into()),
            Matcher::UrlEncoded("status".into(), "CategoryWIP".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"updated":true}"#)
        .create_async()
        .await;

    let (client, _) = browser_client(&server.url());
    let result = client
        .categories()
        .update_category_info("42", "New Title", "G", CategoryStatus::InProgress)
        .await
        .unwrap();

    assert_eq!(result, json!({"updated": true}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_conflict_with_skip_code_is_silent() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/category/42/info")
        .match_query(Matcher::Any)
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(r#"{"current":{"title":"Someone else's title"}}"#)
        .expect(2)
        .create_async()
        .await;

    let (client, notifier) = browser_client(&server.url());
    let categories = client.categories();

    let err = categories
        .update_category_info_with(
            "42",
            "New Title",
            "G",
            CategoryStatus::InProgress,
            RequestOptions::new().skip_error_codes([409]),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(409));
    assert!(err.is_conflict());
    assert_eq!(notifier.count(), 0);

    // Without the opt-out the same conflict reaches the notifier
    let err = categories
        .update_category_info("42", "New Title", "G", CategoryStatus::InProgress)
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(notifier.count(), 1);
    assert_eq!(
        notifier.notifications()[0].message,
        "Something went wrong, could not process \"update category info\" request."
    );
}

#[tokio::test]
async fn test_caller_request_name_overrides_default() {
    let transport = MockTransport::new().respond(500, "");
    let (client, notifier) = mock_browser_client(transport);

    let _ = client
        .categories()
        .update_category_info_with(
            "1",
            "T",
            "G",
            CategoryStatus::Finished,
            RequestOptions::new().request_name("rename category"),
        )
        .await;

    assert_eq!(
        notifier.notifications()[0].message,
        "Something went wrong, could not process \"rename category\" request."
    );
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let mut server = mockito::Server::new_async().await;
    for i in 0..5 {
        let id = format!("c{}", i);
        server
            .mock("GET", format!("/api/category/{}", id).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(full_category(&id, &format!("Title {}", i), "G").to_string())
            .create_async()
            .await;
    }

    let (client, _) = browser_client(&server.url());
    let categories = client.categories();

    let results = futures::future::join_all(
        (0..5).map(|i| categories.get_category_by_id(format!("c{}", i))),
    )
    .await;

    for (i, result) in results.into_iter().enumerate() {
        assert_eq!(result.unwrap().title, format!("Title {}", i));
    }
}
