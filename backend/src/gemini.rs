mod generate;

use crate::Result;
use crate::logging::*;
use ocid_common::config;
use ocid_common::generation::ImagePayload;

/// Gemini generateContent APIのクライアント。
/// APIキーはサーバー側だけが保持し、ブラウザには渡さない。
pub struct Client {
    model: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl Client {
    pub fn new(model: String, base_url: String, api_key: String) -> Self {
        Self {
            model,
            base_url,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn new_default() -> Result<Self> {
        let api_key = config::get("GEMINI_API_KEY")?;
        let base_url = config::get("GEMINI_BASE_URL")?;
        let model = config::get("GEMINI_MODEL")?;
        Ok(Self::new(model, base_url, api_key))
    }

    pub async fn generate(&self, prompt: String, images: Vec<ImagePayload>) -> Result<ImagePayload> {
        let log = DEFAULT.new(o!(
            "function" => "gemini::generate",
            "model" => self.model.clone(),
            "images" => images.len(),
        ));
        info!(log, "Generating image");
        generate::generate(
            &self.client,
            &self.base_url,
            &self.model,
            &self.api_key,
            prompt,
            images,
        )
        .await
    }
}
