use super::*;
use axum::{
    body::Bytes,
    extract::Query,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use shared::{
    domain::{BillStatus, ExpenseType},
    error::ErrorCode,
    protocol::FileUploadQuery,
};
use tokio::net::TcpListener;

fn draft(email: &str, date: &str) -> BillDraft {
    BillDraft {
        email: email.into(),
        expense_type: ExpenseType::Transports,
        name: "test".into(),
        date: date.into(),
        amount: 100.0,
        vat: 10.0,
        pct: Some(50.0),
        commentary: Some("test".into()),
        file_url: None,
        file_name: None,
        status: BillStatus::Pending,
    }
}

async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

async fn list_handler(
    headers: HeaderMap,
    Query(scope): Query<BillScope>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some("Bearer jwt-token");
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let email = scope.email.unwrap_or_default();
    Ok(Json(serde_json::json!([
        {
            "id": "47qAXb6fIm2zOKkLzMro",
            "email": email,
            "type": "Hôtel et logement",
            "name": "encore",
            "date": "2004-04-04",
            "amount": 400,
            "vat": "80",
            "pct": 20,
            "fileUrl": "https://test.storage.tld/v0/b/billable.jpg",
            "status": "pending"
        },
        {
            "id": "negative",
            "email": email,
            "type": "Transports",
            "name": "refund",
            "date": "2004-04-04",
            "amount": -3,
            "status": "pending"
        },
        { "id": "garbage", "type": "Voyage" }
    ])))
}

async fn create_handler(Json(draft): Json<BillDraft>) -> Json<Bill> {
    Json(Bill::from_draft(BillId("created-1".into()), draft))
}

async fn upload_handler(
    headers: HeaderMap,
    Query(query): Query<FileUploadQuery>,
    body: Bytes,
) -> Result<Json<StoredFile>, StatusCode> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    if content_type != Some("image/png") || body.as_ref() != b"png-bytes" {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(StoredFile {
        file_url: format!("https://files.test/{}", query.key),
        key: query.key,
    }))
}

#[tokio::test]
async fn http_list_drops_invalid_records_and_sends_token() {
    let app = Router::new().route("/bills", get(list_handler));
    let url = spawn_server(app).await;
    let store = HttpBillStore::new(format!("{url}/")).with_token(Some("jwt-token".into()));

    let bills = store
        .list_bills(&BillScope::owned_by("a@a"))
        .await
        .expect("list");

    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].email, "a@a");
    assert_eq!(bills[0].vat, 80.0);
}

#[tokio::test]
async fn http_status_failures_carry_erreur_message() {
    let app = Router::new()
        .route("/bills", get(list_handler))
        .route(
            "/broken/bills",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
    let url = spawn_server(app).await;

    let unauthorized = HttpBillStore::new(url.clone())
        .list_bills(&BillScope::all())
        .await
        .expect_err("no token");
    assert_eq!(unauthorized.code, ErrorCode::Unauthorized);

    let missing = HttpBillStore::new(format!("{url}/nowhere"))
        .list_bills(&BillScope::all())
        .await
        .expect_err("404");
    assert_eq!(missing.status, Some(404));
    assert!(missing.to_string().contains("Erreur 404"));

    let broken = HttpBillStore::new(format!("{url}/broken"))
        .list_bills(&BillScope::all())
        .await
        .expect_err("500");
    assert_eq!(broken.to_string(), "Erreur 500");
}

#[tokio::test]
async fn http_create_bill_and_upload_file() {
    let app = Router::new()
        .route("/bills", post(create_handler))
        .route("/bills/files", post(upload_handler));
    let url = spawn_server(app).await;
    let store = HttpBillStore::new(url);

    let bill = store
        .create_bill(draft("a@a", "2021-09-01"))
        .await
        .expect("create");
    assert_eq!(bill.id, BillId("created-1".into()));
    assert_eq!(bill.status, BillStatus::Pending);

    let key = file_storage_key("a@a", "test.png");
    let stored = store
        .create_file(FileUpload {
            email: "a@a".into(),
            file_name: "test.png".into(),
            mime_type: Some("image/png".into()),
            key: key.clone(),
            bytes: b"png-bytes".to_vec(),
        })
        .await
        .expect("upload");
    assert_eq!(stored.key, key);
    assert!(stored.file_url.ends_with("test.png"));
}

#[tokio::test]
async fn transport_failure_is_reported_without_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = HttpBillStore::new(format!("http://{addr}"))
        .list_bills(&BillScope::all())
        .await
        .expect_err("closed port");
    assert_eq!(err.code, ErrorCode::Transport);
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn memory_store_scopes_lists_and_assigns_ids() {
    let store = InMemoryBillStore::new();
    let mine = store.create_bill(draft("a@a", "2021-09-01")).await.expect("create");
    store.create_bill(draft("b@b", "2021-09-02")).await.expect("create");

    assert_eq!(mine.id, BillId("bill-0001".into()));
    let listed = store
        .list_bills(&BillScope::owned_by("a@a"))
        .await
        .expect("list");
    assert_eq!(listed, vec![mine]);
    assert_eq!(store.list_bills(&BillScope::all()).await.expect("list").len(), 2);
}

#[tokio::test]
async fn memory_store_failure_injection_is_one_shot() {
    let store = InMemoryBillStore::new();
    store.fail_next_list(ApiError::from_status(404)).await;

    let err = store.list_bills(&BillScope::all()).await.expect_err("fails once");
    assert_eq!(err.to_string(), "Erreur 404");
    assert!(store.list_bills(&BillScope::all()).await.is_ok());
    assert_eq!(store.calls().await.len(), 2);
}

#[tokio::test]
async fn memory_update_keeps_identifier_and_history() {
    let store = InMemoryBillStore::new();
    let created = store.create_bill(draft("a@a", "2021-09-01")).await.expect("create");

    let mut changed = draft("a@a", "2021-09-03");
    changed.name = "renamed".into();
    let updated = store.update_bill(&created.id, changed).await.expect("update");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "renamed");

    let missing = store
        .update_bill(&BillId("nope".into()), draft("a@a", "2021-09-01"))
        .await
        .expect_err("unknown id");
    assert_eq!(missing.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn missing_store_reports_unavailable_backend() {
    let err = MissingBillStore
        .list_bills(&BillScope::all())
        .await
        .expect_err("no backend");
    assert_eq!(err.code, ErrorCode::Transport);
}

#[test]
fn storage_key_is_scoped_by_email_and_keeps_file_name() {
    let first = file_storage_key("a@a", "image.png");
    let second = file_storage_key("a@a", "image.png");
    assert!(first.as_str().starts_with("a@a/"));
    assert!(first.as_str().ends_with("-image.png"));
    assert_ne!(first, second);
}
