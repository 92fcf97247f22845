use crate::Result;
use anyhow::bail;
use ocid_common::generation::{ImageData, ImagePayload};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        rename = "inlineData",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: String) -> Part {
        Part {
            text: Some(text),
            inline_data: None,
        }
    }

    fn inline(image: ImagePayload) -> Part {
        Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type,
                data: image.data.as_base64().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    pub response_modalities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback", default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(rename = "finishReason", default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptFeedback {
    #[serde(rename = "blockReason", default)]
    pub block_reason: Option<String>,
}

pub async fn generate(
    client: &reqwest::Client,
    base_url: &str,
    model: &str,
    api_key: &str,
    prompt: String,
    images: Vec<ImagePayload>,
) -> Result<ImagePayload> {
    let mut parts = vec![Part::text(prompt)];
    for image in images {
        parts.push(Part::inline(image));
    }
    let request = Request {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            response_modalities: vec!["IMAGE".to_string()],
        },
    };

    let url = format!("{}/models/{}:generateContent", base_url, model);
    let response = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("Gemini API error ({}): {}", status.as_u16(), body);
    }

    let response: Response = response.json().await?;

    // ブロックされたプロンプトはHTTP 200で返ってくる
    if let Some(feedback) = response.prompt_feedback
        && let Some(reason) = feedback.block_reason
    {
        bail!("Prompt diblokir oleh filter keamanan: {}", reason);
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        bail!("Gemini tidak mengembalikan kandidat untuk prompt ini.");
    };

    if let Some(reason) = candidate.finish_reason.as_deref()
        && matches!(reason, "SAFETY" | "IMAGE_SAFETY" | "PROHIBITED_CONTENT")
    {
        bail!("Prompt diblokir oleh filter keamanan: {}", reason);
    }

    let inline_data = candidate
        .content
        .into_iter()
        .flat_map(|content| content.parts)
        .find_map(|part| part.inline_data);

    match inline_data {
        Some(inline) => Ok(ImagePayload {
            mime_type: inline.mime_type,
            data: ImageData::from_base64(inline.data),
        }),
        None => bail!("Gemini tidak mengembalikan data gambar untuk prompt ini."),
    }
}
