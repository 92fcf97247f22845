mod basic;
mod generation;

use anyhow::Result;
use std::sync::Arc;

/// HTTP APIリクエストの基盤となる構造体
pub struct Underlying {
    base_url: String,
    client: reqwest::Client,
}

impl Underlying {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn new_shared(base_url: String) -> Arc<Self> {
        Arc::new(Self::new(base_url))
    }

    /// プレーンテキストを取得するGETリクエスト
    pub async fn get_text(&self, path: &str) -> String {
        let url = format!("{}/{}", self.base_url, path);
        match self.client.get(&url).send().await {
            Ok(res) => res.text().await.unwrap_or_else(|e| format!("Error: {}", e)),
            Err(e) => format!("Error: {}", e),
        }
    }

    /// POSTリクエストを送信してJSONレスポンスをデシリアライズ
    pub async fn post<A, B>(&self, path: &str, body: &A) -> Result<B>
    where
        A: serde::Serialize,
        B: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        Ok(self
            .client
            .post(&url)
            .json(body)
            .send()
            .await?
            .json()
            .await?)
    }
}

pub struct ApiClient {
    pub basic: basic::BasicApi,
    pub generation: generation::GenerationApi,
}

/// クライアントはAppで1度だけ構築し、コンポーネントに渡して使う
pub fn new_client(base_url: String) -> Arc<ApiClient> {
    let underlying = Underlying::new_shared(base_url);
    Arc::new(ApiClient {
        basic: basic::BasicApi {
            underlying: Arc::clone(&underlying),
        },
        generation: generation::GenerationApi {
            underlying: Arc::clone(&underlying),
        },
    })
}
