//! Hume EVI chat-history client — the default `TranscriptSource`.
//!
//! Pages through `GET /v0/evi/chats/{chat_id}` in ascending order and returns
//! every event. No retries: a failed page fails the whole fetch.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::transcript::{RawChatTurn, TranscriptError, TranscriptSource};

pub const DEFAULT_HUME_API_URL: &str = "https://api.hume.ai";
const API_KEY_HEADER: &str = "X-Hume-Api-Key";
const PAGE_SIZE: u32 = 100;
/// Hard cap on pages per chat (10k events).
const MAX_PAGES: u32 = 100;

#[derive(Debug, Deserialize)]
struct ChatEventsPage {
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    events_page: Vec<RawChatTurn>,
}

#[derive(Debug, Deserialize)]
struct HumeErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct HumeClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HumeClient {
    pub fn new(base_url: &str, api_key: String) -> Result<Self, TranscriptError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TranscriptError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            base_url,
            api_key,
        })
    }

    /// Builds the events URL for one page, percent-encoding the chat id.
    fn page_url(&self, chat_id: &str, page_number: u32) -> Result<Url, TranscriptError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TranscriptError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v0", "evi", "chats", chat_id]);
        url.query_pairs_mut()
            .append_pair("page_number", &page_number.to_string())
            .append_pair("page_size", &PAGE_SIZE.to_string())
            .append_pair("ascending_order", "true");
        Ok(url)
    }

    async fn fetch_page(
        &self,
        chat_id: &str,
        page_number: u32,
    ) -> Result<ChatEventsPage, TranscriptError> {
        let response = self
            .client
            .get(self.page_url(chat_id, page_number)?)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TranscriptError::NotFound(chat_id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<HumeErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(TranscriptError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TranscriptSource for HumeClient {
    async fn fetch(&self, chat_id: &str) -> Result<Vec<RawChatTurn>, TranscriptError> {
        if chat_id.trim().is_empty() {
            return Err(TranscriptError::InvalidChatId(chat_id.to_string()));
        }

        let mut turns = Vec::new();
        let mut page_number = 0;

        loop {
            let page = self.fetch_page(chat_id, page_number).await?;
            turns.extend(page.events_page);
            page_number += 1;

            if page_number >= page.total_pages {
                break;
            }
            if page_number >= MAX_PAGES {
                warn!(
                    "Chat {} has {} pages; stopping at {}",
                    chat_id, page.total_pages, MAX_PAGES
                );
                break;
            }
        }

        debug!("Fetched {} chat events for chat {}", turns.len(), chat_id);
        Ok(turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_encodes_chat_id_and_query() {
        let client = HumeClient::new("https://api.hume.ai", "key".to_string()).unwrap();
        let url = client.page_url("abc/def", 2).unwrap();
        assert_eq!(url.path(), "/v0/evi/chats/abc%2Fdef");
        let query = url.query().unwrap();
        assert!(query.contains("page_number=2"));
        assert!(query.contains("page_size=100"));
        assert!(query.contains("ascending_order=true"));
    }

    #[test]
    fn test_page_url_respects_base_path() {
        let client = HumeClient::new("http://localhost:9000/proxy/", "key".to_string()).unwrap();
        let url = client.page_url("chat-1", 0).unwrap();
        assert_eq!(url.path(), "/proxy/v0/evi/chats/chat-1");
    }

    #[test]
    fn test_events_page_deserializes() {
        let json = r#"{
            "id": "chat-1",
            "page_number": 0,
            "page_size": 100,
            "total_pages": 1,
            "events_page": [
                {"id": "e1", "type": "SYSTEM_PROMPT", "role": "SYSTEM", "message_text": "be nice"},
                {"id": "e2", "type": "AGENT_MESSAGE", "role": "AGENT", "message_text": "Hello"},
                {"id": "e3", "type": "USER_MESSAGE", "role": "USER", "message_text": "Hi",
                 "emotion_features": "{\"Joy\": 0.2}"}
            ]
        }"#;
        let page: ChatEventsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.events_page.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_rejects_blank_chat_id() {
        let client = HumeClient::new(DEFAULT_HUME_API_URL, "key".to_string()).unwrap();
        let err = client.fetch("   ").await.unwrap_err();
        assert!(matches!(err, TranscriptError::InvalidChatId(_)));
    }
}
