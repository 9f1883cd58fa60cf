use super::*;

fn test_client(base_url: &str) -> YouTubeClient {
    YouTubeClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_appends_resource_and_key() {
    let client = test_client("https://www.googleapis.com/youtube/v3");
    let url = client.build_url("search", &[("part", "snippet")]);
    assert_eq!(
        url.as_str(),
        "https://www.googleapis.com/youtube/v3/search?part=snippet&key=test-key"
    );
}

#[test]
fn build_url_tolerates_trailing_slash() {
    let client = test_client("https://www.googleapis.com/youtube/v3/");
    let url = client.build_url("commentThreads", &[("videoId", "abc")]);
    assert_eq!(
        url.as_str(),
        "https://www.googleapis.com/youtube/v3/commentThreads?videoId=abc&key=test-key"
    );
}

#[test]
fn build_url_encodes_special_characters() {
    let client = test_client("https://www.googleapis.com/youtube/v3");
    let url = client.build_url("search", &[("q", "pemilu & debat")]);
    assert!(
        url.as_str().contains("pemilu+%26+debat"),
        "query param should be percent-encoded: {url}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = YouTubeClient::with_base_url("k", 30, "not a url");
    assert!(result.is_err());
}

#[test]
fn forbidden_and_rate_limited_are_quota_or_auth() {
    for status in [
        StatusCode::UNAUTHORIZED,
        StatusCode::FORBIDDEN,
        StatusCode::TOO_MANY_REQUESTS,
    ] {
        let err = classify_status(status, "nope".to_owned());
        assert!(err.is_quota_or_auth(), "{status} should be quota/auth");
    }
}

#[test]
fn server_error_is_generic() {
    let err = classify_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_owned());
    assert!(!err.is_quota_or_auth());
    assert!(err.to_string().contains("500"));
}

#[test]
fn error_message_reads_platform_envelope() {
    let body = r#"{"error": {"code": 403, "message": "The request cannot be completed because you have exceeded your quota."}}"#;
    assert_eq!(
        error_message(body, StatusCode::FORBIDDEN),
        "The request cannot be completed because you have exceeded your quota."
    );
}

#[test]
fn error_message_falls_back_to_reason_phrase() {
    assert_eq!(
        error_message("<html>oops</html>", StatusCode::BAD_GATEWAY),
        "Bad Gateway"
    );
}

#[test]
fn new_client_has_unused_quota() {
    let client = test_client("https://www.googleapis.com/youtube/v3");
    assert_eq!(client.quota_usage().quota_used, 0);
}
