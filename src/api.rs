//! HTTP calls against the message API, shared by the native and WASM clients

use tracing::{debug, warn};

use crate::config::BoardConfig;
use crate::core::{parse_message, parse_message_list, ApiError, Message, MessageDraft};

/// Messages collection URL, or `NotConfigured` when running offline
pub fn endpoint(config: &BoardConfig) -> Result<String, ApiError> {
    config.messages_url().ok_or(ApiError::NotConfigured)
}

/// `GET {base}/api/messages`
pub async fn fetch_messages(client: &reqwest::Client, url: &str) -> Result<Vec<Message>, ApiError> {
    debug!(url, "Fetching messages");
    let response = client.get(url).send().await.map_err(transport)?;
    let body = read_body(response).await?;
    parse_message_list(&body)
}

/// `POST {base}/api/messages`, returning the stored record
pub async fn post_message(
    client: &reqwest::Client,
    url: &str,
    draft: &MessageDraft,
) -> Result<Message, ApiError> {
    debug!(url, rating = draft.rating, "Posting message");
    let response = client
        .post(url)
        .json(draft)
        .send()
        .await
        .map_err(transport)?;
    let body = read_body(response).await?;
    parse_message(&body)
}

async fn read_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "Message API returned an error status");
        return Err(ApiError::Status(status.as_u16()));
    }
    response.text().await.map_err(transport)
}

fn transport(e: reqwest::Error) -> ApiError {
    warn!(error = %e, "Message API request failed");
    ApiError::Transport(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_requires_base_url() {
        assert!(matches!(
            endpoint(&BoardConfig::default()),
            Err(ApiError::NotConfigured)
        ));

        let config = BoardConfig {
            api_base_url: Some("https://board.example".into()),
            ..BoardConfig::default()
        };
        assert_eq!(
            endpoint(&config).ok().as_deref(),
            Some("https://board.example/api/messages")
        );
    }
}
