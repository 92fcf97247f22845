use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// base64エンコード済みの画像バイト列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData(String);

impl ImageData {
    pub fn from_bytes(bytes: &[u8]) -> ImageData {
        ImageData(STANDARD.encode(bytes))
    }

    pub fn from_base64(encoded: String) -> ImageData {
        ImageData(encoded)
    }

    pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        Ok(STANDARD.decode(&self.0)?)
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }
}

/// アップロードされたファイル1枚分のペイロード。
/// リクエストを組み立てる間だけ存在する一時データ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: ImageData,
}

impl ImagePayload {
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> ImagePayload {
        ImagePayload {
            mime_type: mime_type.into(),
            data: ImageData::from_bytes(bytes),
        }
    }

    /// ブラウザでそのまま表示できるdata URLに変換
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data.as_base64())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextToImageRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEditRequest {
    pub prompt: String,
    pub images: Vec<ImagePayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceSwapRequest {
    pub source_image: ImagePayload,
    pub target_image: ImagePayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImageResponse {
    pub image: ImagePayload,
}

/// 送信前バリデーションのエラー。メッセージはそのままUIに表示される。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Prompt kosong.")]
    EmptyPrompt,
    #[error("Pilih minimal satu gambar.")]
    NoImages,
}

/// 3つの機能のリクエストをまとめたパラメータ。
/// 一度組み立てたら変更せず、リクエスト完了後に破棄する。
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationParams {
    TextToImage(TextToImageRequest),
    ImageEdit(ImageEditRequest),
    FaceSwap(FaceSwapRequest),
}

impl GenerationParams {
    /// 空のプロンプトや画像なしのリクエストを送信前に弾く
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            GenerationParams::TextToImage(request) => validate_prompt(&request.prompt),
            GenerationParams::ImageEdit(request) => {
                validate_prompt(&request.prompt)?;
                if request.images.is_empty() {
                    return Err(ValidationError::NoImages);
                }
                Ok(())
            }
            // 2枚の画像は型レベルで必須なのでここでは何もしない
            GenerationParams::FaceSwap(_) => Ok(()),
        }
    }
}

fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    if prompt.trim().is_empty() {
        return Err(ValidationError::EmptyPrompt);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_format() {
        let payload = ImagePayload::from_bytes("image/png", &[0, 0, 0]);
        assert_eq!(payload.to_data_url(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_image_data_bytes() {
        let data = ImageData::from_bytes(b"ocid");
        assert_eq!(data.to_bytes().unwrap(), b"ocid");
    }

    #[test]
    fn test_validate_empty_prompt() {
        let params = GenerationParams::TextToImage(TextToImageRequest {
            prompt: "   ".to_string(),
        });
        assert_eq!(params.validate(), Err(ValidationError::EmptyPrompt));
        assert_eq!(
            ValidationError::EmptyPrompt.to_string(),
            "Prompt kosong."
        );
    }

    #[test]
    fn test_validate_edit_without_images() {
        let params = GenerationParams::ImageEdit(ImageEditRequest {
            prompt: "lukisan cat air".to_string(),
            images: vec![],
        });
        assert_eq!(params.validate(), Err(ValidationError::NoImages));
    }

    #[test]
    fn test_validate_ok() {
        let params = GenerationParams::ImageEdit(ImageEditRequest {
            prompt: "lukisan cat air".to_string(),
            images: vec![ImagePayload::from_bytes("image/jpeg", &[1, 2, 3])],
        });
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_response_envelope_serde() {
        let response: crate::ApiResponse<GeneratedImageResponse, String> =
            crate::ApiResponse::Success(GeneratedImageResponse {
                image: ImagePayload::from_bytes("image/png", &[0]),
            });
        let json = serde_json::to_string(&response).unwrap();
        let parsed: crate::ApiResponse<GeneratedImageResponse, String> =
            serde_json::from_str(&json).unwrap();
        match parsed {
            crate::ApiResponse::Success(generated) => {
                assert_eq!(generated.image.mime_type, "image/png");
            }
            crate::ApiResponse::Error(message) => panic!("unexpected error: {}", message),
        }
    }
}
