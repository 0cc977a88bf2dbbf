use navlungo_api::{Client, ClientError, NavlungoCredentials, TransportError};
use reqwest::StatusCode;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The client is blocking; drive it off the async test thread.
async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

fn base_url(server: &MockServer) -> String {
    format!("{}/v2.1", server.uri())
}

async fn assert_no_requests(server: &MockServer) {
    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "unexpected requests: {requests:?}");
}

#[tokio::test]
async fn token_from_create_token_is_sent_on_later_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.1/auth/api"))
        .and(body_json(json!({ "username": "acme", "password": "secret" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "access_token": "abc" } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.1/post/check/NVL-1"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "delivered" })))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = base_url(&server);
    let (token, token_response, response) = blocking(move || {
        let mut client = Client::new(&base_url, None)?;
        let token_response =
            client.create_token(&json!({ "username": "acme", "password": "secret" }))?;
        let token = client.token().map(str::to_string);
        let response = client.check_post("NVL-1")?;
        Ok::<_, ClientError>((token, token_response, response))
    })
    .await
    .unwrap();

    assert_eq!(token.as_deref(), Some("abc"));
    assert_eq!(token_response, json!({ "data": { "access_token": "abc" } }));
    assert_eq!(response, json!({ "status": "delivered" }));
}

#[tokio::test]
async fn login_replaces_initial_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.1/auth/api"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "access_token": "fresh" } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.1/carrier/my-carriers"))
        .and(header("authorization", "Bearer fresh"))
        .and(body_json(json!({ "limit": 20, "page": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = base_url(&server);
    blocking(move || {
        let mut client = Client::new(&base_url, Some("stale"))?;
        client.login(&NavlungoCredentials::new("acme", "secret"))?;
        client.get_my_carriers(&json!({}))
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn token_response_without_access_token_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.1/auth/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .mount(&server)
        .await;

    let base_url = base_url(&server);
    let (err, token) = blocking(move || {
        let mut client = Client::new(&base_url, Some("old")).unwrap();
        let err = client
            .create_token(&json!({ "username": "acme", "password": "secret" }))
            .unwrap_err();
        (err, client.token().map(str::to_string))
    })
    .await;

    assert!(matches!(
        err,
        ClientError::Transport(TransportError::MalformedResponse(_))
    ));
    assert_eq!(token.as_deref(), Some("old"));
}

#[tokio::test]
async fn create_address_sends_only_given_keys() {
    let payload = json!({
        "address_type": "recipient",
        "address_name": "Jane",
        "address_phone": "555",
        "address_line": "X",
        "address_country": "TR",
        "address_city": "Ankara",
        "address_district": "Cankaya",
    });

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.1/address-book/create"))
        .and(header("authorization", "Bearer abc"))
        .and(body_json(payload.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": { "id": 7 } })))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = base_url(&server);
    let response = blocking(move || Client::new(&base_url, Some("abc"))?.create_address(&payload))
        .await
        .unwrap();

    assert_eq!(response, json!({ "data": { "id": 7 } }));
}

#[tokio::test]
async fn get_barcode_posts_validated_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.1/barcode/getBarcode"))
        .and(body_json(json!({ "post_number": "123", "barcode_type": "pdf" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "JVBERi0x" })))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = base_url(&server);
    let response = blocking(move || {
        Client::new(&base_url, None)?
            .get_barcode(&json!({ "post_number": "123", "barcode_type": "pdf" }))
    })
    .await
    .unwrap();

    assert_eq!(response["data"], "JVBERi0x");
}

#[tokio::test]
async fn invalid_barcode_type_never_reaches_the_network() {
    let server = MockServer::start().await;

    let base_url = base_url(&server);
    let err = blocking(move || {
        Client::new(&base_url, Some("abc"))
            .unwrap()
            .get_barcode(&json!({ "post_number": "123", "barcode_type": "docx" }))
            .unwrap_err()
    })
    .await;

    match err {
        ClientError::Validation(err) => {
            assert_eq!(err.fields().collect::<Vec<_>>(), vec!["barcode_type"]);
        }
        other => panic!("expected a validation error, got {other:?}"),
    }
    assert_no_requests(&server).await;
}

#[tokio::test]
async fn create_post_missing_fields_never_reaches_the_network() {
    let server = MockServer::start().await;

    let base_url = base_url(&server);
    let err = blocking(move || {
        Client::new(&base_url, Some("abc"))
            .unwrap()
            .create_post(&json!({ "posts": [{ "reference_id": "REF-1" }] }))
            .unwrap_err()
    })
    .await;

    assert!(err.is_validation());
    assert_eq!(err.status(), None);
    assert_no_requests(&server).await;
}

#[tokio::test]
async fn create_post_serializes_carrier_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.1/post/create"))
        .and(body_json(json!({
            "platform": "shopify",
            "posts": [{
                "reference_id": "REF-1",
                "carrier_id": 13,
                "post_type": 1,
                "sender": { "addressId": "42" },
                "recipient": { "name": "Jane", "city": "Ankara" },
                "post": { "desi": 1.0, "package_count": 2, "note": "fragile" },
                "barcode_format": "zpl",
            }],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": true })))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = base_url(&server);
    blocking(move || {
        Client::new(&base_url, Some("abc"))?.create_post(&json!({
            "platform": "shopify",
            "posts": [{
                "reference_id": "REF-1",
                "carrier_id": "ARAS_KARGO",
                "post_type": 1,
                "cod_payment_type": null,
                "sender": { "addressId": "42" },
                "recipient": { "name": "Jane", "city": "Ankara" },
                "post": { "desi": 1.0, "package_count": 2, "note": "fragile" },
                "barcode_format": "zpl",
            }],
        }))
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.1/address-book/get/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("address not found"))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = base_url(&server);
    let err = blocking(move || {
        Client::new(&base_url, Some("abc"))
            .unwrap()
            .get_address(99)
            .unwrap_err()
    })
    .await;

    assert!(!err.is_validation());
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    match err {
        ClientError::Transport(TransportError::Status { body, .. }) => {
            assert_eq!(body, "address not found");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.1/post/cancel"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "expired" })))
        .mount(&server)
        .await;

    let base_url = base_url(&server);
    let err = blocking(move || {
        Client::new(&base_url, Some("abc"))
            .unwrap()
            .cancel_post(&json!({ "post_number": "NVL-1" }))
            .unwrap_err()
    })
    .await;

    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn address_id_is_templated_into_the_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2.1/address-book/update/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "updated": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2.1/address-book/delete/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = base_url(&server);
    let (updated, deleted) = blocking(move || {
        let client = Client::new(&base_url, Some("abc"))?;
        let updated = client.update_address(
            7,
            &json!({
                "address_type": "sender",
                "location_name": "Depot",
                "address_name": "Acme",
                "address_phone": "555",
                "address_line": "X",
                "address_country": "TR",
                "address_city": "Izmir",
                "address_district": "Konak",
                "is_main_warehouse": 1,
            }),
        )?;
        let deleted = client.delete_address(7)?;
        Ok::<_, ClientError>((updated, deleted))
    })
    .await
    .unwrap();

    assert_eq!(updated, json!({ "updated": true }));
    assert_eq!(deleted, Value::Null);
}

#[tokio::test]
async fn listing_sends_defaulted_pagination_as_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.1/address-book/getAll"))
        .and(body_json(json!({ "limit": 20, "page": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.1/carrier/getAll"))
        .and(body_json(json!({ "limit": 5, "page": 2, "filters": { "name": "VIGO" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = base_url(&server);
    blocking(move || {
        let client = Client::new(&base_url, Some("abc"))?;
        client.get_all_addresses(&json!({}))?;
        client.get_all_carriers(&json!({ "limit": 5, "page": 2, "filters": { "name": "VIGO" } }))
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn update_post_forwards_partial_overrides() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.1/post/update"))
        .and(body_json(json!({
            "post_number": "NVL-1",
            "post": { "desi": 3.0, "package_count": 1 },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": true })))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = base_url(&server);
    blocking(move || {
        Client::new(&base_url, Some("abc"))?.update_post(&json!({
            "post_number": "NVL-1",
            "post": { "desi": 3.0, "package_count": 1 },
        }))
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn non_json_success_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.1/post/check/NVL-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let base_url = base_url(&server);
    let err = blocking(move || {
        Client::new(&base_url, None)
            .unwrap()
            .check_post("NVL-1")
            .unwrap_err()
    })
    .await;

    assert!(matches!(
        err,
        ClientError::Transport(TransportError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn connection_failure_is_a_transport_error() {
    // Bind and release a port so nothing is listening on it.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let err = blocking(move || {
        Client::new(&format!("http://127.0.0.1:{port}/v2.1"), None)
            .unwrap()
            .check_post("NVL-1")
            .unwrap_err()
    })
    .await;

    assert!(matches!(
        err,
        ClientError::Transport(TransportError::Network(_))
    ));
    assert_eq!(err.status(), None);
}
