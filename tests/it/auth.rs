use super::*;

#[tokio::test]
#[serial]
async fn token_is_fetched_once_and_reused() {
    let mut server = Server::new_async().await;
    let token = mock_token(&mut server, "24.token", 1).await;
    let emotion = server
        .mock("POST", "/rpc/2.0/nlp/v1/emotion")
        .match_query(with_token("24.token"))
        .with_status(200)
        .with_body(r#"{"log_id":5,"items":[]}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server);
    let options = NlpOptions::new().scene(EmotionScene::Talk);
    client.emotion("今天好开心", Some(&options)).await.unwrap();
    client.clone().emotion("今天好开心", None).await.unwrap();

    token.assert_async().await;
    emotion.assert_async().await;
}

#[tokio::test]
#[serial]
async fn expired_token_is_refreshed_and_request_resent() {
    let mut server = Server::new_async().await;
    let first = mock_token(&mut server, "24.old", 1).await;
    let second = mock_token(&mut server, "24.new", 1).await;
    let rejected = server
        .mock("POST", "/rpc/2.0/nlp/v2/word_emb_vec")
        .match_query(with_token("24.old"))
        .with_status(200)
        .with_body(r#"{"error_code":111,"error_msg":"Access token expired"}"#)
        .expect(1)
        .create_async()
        .await;
    let accepted = server
        .mock("POST", "/rpc/2.0/nlp/v2/word_emb_vec")
        .match_query(with_token("24.new"))
        .with_status(200)
        .with_body(r#"{"word":"张飞","vec":[0.1,0.2]}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let res = client.word_embedding("张飞", None).await.unwrap();

    assert_eq!(res["word"], "张飞");
    first.assert_async().await;
    second.assert_async().await;
    rejected.assert_async().await;
    accepted.assert_async().await;
}

#[tokio::test]
#[serial]
async fn rejected_credentials_surface_as_auth_error() {
    let mut server = Server::new_async().await;
    let _token = server
        .mock("POST", "/oauth/2.0/token")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"error":"invalid_client","error_description":"unknown client id"}"#)
        .create_async()
        .await;
    let never = server
        .mock("POST", "/rpc/2.0/nlp/v1/depparser")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.dep_parser("今天天气怎么样", None).await.unwrap_err();

    match err {
        ClientError::Auth { error, description } => {
            assert_eq!(error, "invalid_client");
            assert_eq!(description, "unknown client id");
        }
        other => panic!("unexpected error: {other}"),
    }
    never.assert_async().await;
}

#[tokio::test]
#[serial]
async fn oversized_token_lifetime_is_accepted() {
    let mut server = Server::new_async().await;
    let token = server
        .mock("POST", "/oauth/2.0/token")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "access_token": "24.forever",
                "expires_in": u64::MAX,
                "scope": "public"
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let lexer = server
        .mock("POST", "/rpc/2.0/nlp/v1/lexer")
        .match_query(with_token("24.forever"))
        .with_status(200)
        .with_body(r#"{"log_id":8,"items":[]}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server);
    client.lexer("百度", None).await.unwrap();
    client.lexer("百度", None).await.unwrap();

    token.assert_async().await;
    lexer.assert_async().await;
}

#[tokio::test]
#[serial]
async fn token_gateway_page_surfaces_as_http_error() {
    let mut server = Server::new_async().await;
    let _token = server
        .mock("POST", "/oauth/2.0/token")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html><body>Bad Gateway</body></html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.topic("标题", "正文", None).await.unwrap_err();

    match err {
        ClientError::Http { status, body } => {
            assert_eq!(status, 502);
            assert!(body.contains("Bad Gateway"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
