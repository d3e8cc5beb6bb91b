use super::*;

#[tokio::test]
#[serial]
async fn sentiment_classify_end_to_end() {
    let mut server = Server::new_async().await;
    let token = mock_token(&mut server, "24.token", 1).await;
    let expected_body = gbk(r#"{"text":"服务很好"}"#);
    let sentiment = server
        .mock("POST", "/rpc/2.0/nlp/v1/sentiment_classify")
        .match_query(with_token("24.token"))
        .match_header("content-type", "application/json")
        .match_header("content-encoding", "GBK")
        .match_request(move |req| req.body().map(|b| *b == expected_body).unwrap_or(false))
        .with_status(200)
        .with_header("content-type", "application/json;charset=UTF-8")
        .with_body(
            json!({
                "log_id": 1,
                "text": "服务很好",
                "items": [{"sentiment": 2, "confidence": 0.9, "positive_prob": 0.95, "negative_prob": 0.05}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let res = client.sentiment_classify("服务很好", None).await.unwrap();

    assert_eq!(res["text"], "服务很好");
    assert_eq!(res["items"][0]["sentiment"], 2);
    token.assert_async().await;
    sentiment.assert_async().await;
}

#[tokio::test]
#[serial]
async fn simnet_sends_texts_in_order_with_options() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server, "24.token", 1).await;
    let expected_body = gbk(r#"{"text_1":"你好","text_2":"您好","model":"CNN"}"#);
    let simnet = server
        .mock("POST", "/rpc/2.0/nlp/v2/simnet")
        .match_query(with_token("24.token"))
        .match_request(move |req| req.body().map(|b| *b == expected_body).unwrap_or(false))
        .with_status(200)
        .with_body(r#"{"log_id":2,"score":0.94}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let options = NlpOptions::new().model(SimnetModel::Cnn);
    let res = client.simnet("你好", "您好", Some(&options)).await.unwrap();

    assert_eq!(res["score"], 0.94);
    simnet.assert_async().await;
}

#[tokio::test]
#[serial]
async fn gbk_response_without_charset_is_decoded() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server, "24.token", 1).await;
    let _lexer = server
        .mock("POST", "/rpc/2.0/nlp/v1/lexer")
        .match_query(with_token("24.token"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gbk(r#"{"text":"百度","items":[{"item":"百度","ne":"ORG"}]}"#))
        .create_async()
        .await;

    let client = client_for(&server);
    let res = client.lexer("百度", None).await.unwrap();

    assert_eq!(res["items"][0]["item"], "百度");
    assert_eq!(res["items"][0]["ne"], "ORG");
}

#[tokio::test]
#[serial]
async fn utf8_response_without_charset_is_decoded() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server, "24.token", 1).await;
    let _sentiment = server
        .mock("POST", "/rpc/2.0/nlp/v1/sentiment_classify")
        .match_query(with_token("24.token"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"text":"服务很好","items":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let res = client.sentiment_classify("服务很好", None).await.unwrap();

    assert_eq!(res["text"], "服务很好");
}

#[tokio::test]
#[serial]
async fn api_error_object_is_returned_verbatim() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server, "24.token", 1).await;
    let _ecnet = server
        .mock("POST", "/rpc/2.0/nlp/v1/ecnet")
        .match_query(with_token("24.token"))
        .with_status(200)
        .with_body(r#"{"log_id":3,"error_code":282131,"error_msg":"option not supported"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let res = client.ecnet("百度是一家人工只能公司", None).await.unwrap();

    let api_error = ApiError::from_response(&res).unwrap();
    assert_eq!(api_error.error_code, 282131);
    assert_eq!(api_error.error_msg, "option not supported");
}

#[tokio::test]
#[serial]
async fn client_error_status_fails_without_retry() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server, "24.token", 1).await;
    let topic = server
        .mock("POST", "/rpc/2.0/nlp/v1/topic")
        .match_query(with_token("24.token"))
        .with_status(400)
        .with_body("bad request")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.topic("标题", "正文", None).await.unwrap_err();

    match err {
        ClientError::Http { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "bad request");
        }
        other => panic!("unexpected error: {other}"),
    }
    topic.assert_async().await;
}

#[tokio::test]
#[serial]
async fn rate_limited_request_is_retried() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server, "24.token", 1).await;
    let limited = server
        .mock("POST", "/rpc/2.0/nlp/v1/keyword")
        .match_query(with_token("24.token"))
        .with_status(200)
        .with_body(r#"{"error_code":18,"error_msg":"Open api qps request limit reached"}"#)
        .expect(1)
        .create_async()
        .await;
    let ok = server
        .mock("POST", "/rpc/2.0/nlp/v1/keyword")
        .match_query(with_token("24.token"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"log_id":4,"items":[{"score":0.9,"tag":"人工智能"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let client = AipNlp::builder()
        .with_api_host(server.url())
        .with_api_key(API_KEY)
        .with_secret_key(SECRET_KEY)
        .with_max_retry_elapsed(Duration::from_secs(10))
        .logging_enabled(false)
        .init()
        .unwrap();
    let res = client.keyword("标题", "正文", None).await.unwrap();

    assert_eq!(res["items"][0]["tag"], "人工智能");
    limited.assert_async().await;
    ok.assert_async().await;
}

#[tokio::test]
#[serial]
async fn server_error_status_is_retried() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server, "24.token", 1).await;
    let unavailable = server
        .mock("POST", "/rpc/2.0/nlp/v1/news_summary")
        .match_query(with_token("24.token"))
        .with_status(503)
        .with_body("service unavailable")
        .expect(1)
        .create_async()
        .await;
    let ok = server
        .mock("POST", "/rpc/2.0/nlp/v1/news_summary")
        .match_query(with_token("24.token"))
        .with_status(200)
        .with_body(r#"{"log_id":6,"summary":"摘要"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = AipNlp::builder()
        .with_api_host(server.url())
        .with_api_key(API_KEY)
        .with_secret_key(SECRET_KEY)
        .with_max_retry_elapsed(Duration::from_secs(10))
        .logging_enabled(false)
        .init()
        .unwrap();
    let res = client.news_summary("正文", 100, None).await.unwrap();

    assert_eq!(res["summary"], "摘要");
    unavailable.assert_async().await;
    ok.assert_async().await;
}

#[tokio::test]
#[serial]
async fn rate_limit_past_retry_budget_is_an_api_error() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server, "24.token", 1).await;
    let limited = server
        .mock("POST", "/rpc/2.0/nlp/v1/keyword")
        .match_query(with_token("24.token"))
        .with_status(200)
        .with_body(r#"{"error_code":18,"error_msg":"Open api qps request limit reached"}"#)
        .expect_at_least(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.keyword("标题", "正文", None).await.unwrap_err();

    match err {
        ClientError::Api(api_error) => {
            assert_eq!(api_error.error_code, ApiError::QPS_LIMIT);
            assert_eq!(api_error.error_msg, "Open api qps request limit reached");
        }
        other => panic!("unexpected error: {other}"),
    }
    limited.assert_async().await;
}
