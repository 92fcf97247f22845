use crate::server_api::Underlying;
use anyhow::{Result, anyhow};
use ocid_common::ApiResponse;
use ocid_common::generation::{GeneratedImageResponse, GenerationParams};
use std::sync::Arc;

pub struct GenerationApi {
    pub underlying: Arc<Underlying>,
}

impl GenerationApi {
    /// バックエンド経由で画像を生成して、表示用のdata URLを返す
    pub async fn generate(&self, params: GenerationParams) -> Result<String> {
        match params {
            GenerationParams::TextToImage(request) => {
                self.request("generate/text_to_image", &request).await
            }
            GenerationParams::ImageEdit(request) => {
                self.request("generate/image_edit", &request).await
            }
            GenerationParams::FaceSwap(request) => {
                self.request("generate/face_swap", &request).await
            }
        }
    }

    async fn request<A>(&self, path: &str, body: &A) -> Result<String>
    where
        A: serde::Serialize,
    {
        let response: ApiResponse<GeneratedImageResponse, String> =
            self.underlying.post(path, body).await?;
        match response {
            ApiResponse::Success(generated) => Ok(generated.image.to_data_url()),
            ApiResponse::Error(message) => Err(anyhow!(message)),
        }
    }
}
