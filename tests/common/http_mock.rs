use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

pub const TOKEN_PATH: &str = "/identity/v1/oauth2/token";

/// Start a mock token endpoint that only answers a well-formed
/// authorization-code grant for the test credentials.
#[allow(dead_code)]
pub async fn start_token_server(
    response: ResponseTemplate,
    expected_calls: impl Into<Times>,
) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("authorization", super::BASIC_AUTH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("redirect_uri=Test_RuName"))
        .respond_with(response)
        .expect(expected_calls)
        .mount(&server)
        .await;

    server
}

/// Successful token response in eBay's shape.
#[allow(dead_code)]
pub fn token_body(access: &str, refresh: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": access,
        "expires_in": 7200,
        "refresh_token": refresh,
        "refresh_token_expires_in": 47304000,
        "token_type": "User Access Token"
    })
}

pub fn token_endpoint(server: &MockServer) -> String {
    format!("{}{}", server.uri(), TOKEN_PATH)
}
