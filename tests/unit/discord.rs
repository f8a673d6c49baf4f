use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wa_relay::channels::discord::{embed_body, DiscordClient};
use wa_relay::relay::RelaySink;
use wa_relay::types::RelayMessage;

fn relay_message() -> RelayMessage {
    RelayMessage {
        description: "hello".to_string(),
        author_name: "Alice".to_string(),
        author_icon_url: "http://s3.cri.epita.fr/cri-intranet/img/blank.jpg".to_string(),
        timestamp: "2024-05-01T12:30:00.000Z".to_string(),
        color: 0x25D366,
    }
}

fn client(server: &MockServer) -> DiscordClient {
    DiscordClient::new(reqwest::Client::new(), "bot-token".to_string())
        .with_api_base(server.uri())
}

#[test]
fn test_embed_body_shape() {
    let body = embed_body(&relay_message());
    let embed = &body["embeds"][0];
    assert_eq!(embed["description"], "hello");
    assert_eq!(embed["timestamp"], "2024-05-01T12:30:00.000Z");
    assert_eq!(embed["color"], 0x25D366);
    assert_eq!(embed["author"]["name"], "Alice");
    assert_eq!(
        embed["author"]["icon_url"],
        "http://s3.cri.epita.fr/cri-intranet/img/blank.jpg"
    );
}

#[tokio::test]
async fn test_send_text_posts_embed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/channels/112233/messages"))
        .and(header("Authorization", "Bot bot-token"))
        .and(body_partial_json(json!({
            "embeds": [{"description": "hello", "color": 0x25D366}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.send_text("112233", &relay_message()).await.unwrap();
}

#[tokio::test]
async fn test_send_text_surfaces_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/channels/112233/messages"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "Missing Access"})),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.send_text("112233", &relay_message()).await.unwrap_err();
    assert!(err.to_string().contains("403"));
}

#[tokio::test]
async fn test_send_file_uploads_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/channels/112233/messages"))
        .and(header("Authorization", "Bot bot-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "2"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client
        .send_file("112233", "image.jpeg", b"jpegbytes")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_send_file_surfaces_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/channels/112233/messages"))
        .respond_with(ResponseTemplate::new(413))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client
        .send_file("112233", "image.jpeg", b"jpegbytes")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("413"));
}

#[tokio::test]
async fn test_connect_checks_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .and(header("Authorization", "Bot bot-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"username": "relay-bot"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.connect().await.unwrap();
}

#[tokio::test]
async fn test_connect_rejected_token_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.connect().await.unwrap_err();
    assert!(err.to_string().contains("401"));
}
