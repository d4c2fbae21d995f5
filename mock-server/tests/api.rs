use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, app_with, Employee, EmployeeInput, Table};
use tower::ServiceExt;

const ADA: &str = r#"{
    "firstName": "Ada",
    "lastName": "Lovelace",
    "email": "ada@example.com",
    "phoneNumber": "555-0100",
    "addresses": [{
        "streetName": "Main St",
        "postalCode": "K1A 0B1",
        "apartmentNumber": 12,
        "state": "ON",
        "country": "Canada"
    }]
}"#;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn seeded(emails: &[&str]) -> Router {
    let mut table = Table::default();
    for email in emails {
        let input: EmployeeInput =
            serde_json::from_str(&ADA.replace("ada@example.com", email)).unwrap();
        table.insert(input);
    }
    app_with(table)
}

// --- list ---

#[tokio::test]
async fn list_employees_empty() {
    let resp = app().oneshot(empty_request("GET", "/employee")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let employees: Vec<Employee> = body_json(resp).await;
    assert!(employees.is_empty());
}

#[tokio::test]
async fn list_employees_in_insertion_order() {
    let resp = seeded(&["c@x.com", "a@x.com", "b@x.com"])
        .oneshot(empty_request("GET", "/employee"))
        .await
        .unwrap();

    let employees: Vec<Employee> = body_json(resp).await;
    let emails: Vec<_> = employees.iter().map(|e| e.email.as_str()).collect();
    assert_eq!(emails, vec!["c@x.com", "a@x.com", "b@x.com"]);
    let ids: Vec<_> = employees.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

// --- create ---

#[tokio::test]
async fn create_employee_returns_201_with_id() {
    let resp = app()
        .oneshot(json_request("POST", "/employee", ADA))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let employee: Employee = body_json(resp).await;
    assert_eq!(employee.id, 1);
    assert_eq!(employee.email, "ada@example.com");
    assert_eq!(employee.addresses[0].apartment_number, Some(12));
}

#[tokio::test]
async fn create_employee_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/employee", r#"{"firstName":"A"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_employee_not_found() {
    let resp = app().oneshot(empty_request("GET", "/employee/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_employee_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/employee/not-a-number"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_employee_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/employee/7", ADA))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_employee_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/employee/7"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = seeded(&["first@x.com"]).into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/employee", ADA))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Employee = body_json(resp).await;
    let id = created.id;
    assert_eq!(id, 2);

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/employee/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Employee = body_json(resp).await;
    assert_eq!(fetched, created);

    // update; the path id wins over whatever the body says
    let edited = ADA
        .replace("\"Ada\"", "\"Augusta\"")
        .replacen('{', "{\"id\": 999,", 1);
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", &format!("/employee/{id}"), &edited))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/employee/{id}")))
        .await
        .unwrap();
    let fetched: Employee = body_json(resp).await;
    assert_eq!(fetched.id, id);
    assert_eq!(fetched.first_name, "Augusta");

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/employee/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // get after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/employee/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete: only the seeded row is left
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/employee"))
        .await
        .unwrap();
    let employees: Vec<Employee> = body_json(resp).await;
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].email, "first@x.com");
}
