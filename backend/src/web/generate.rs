use super::AppState;
use crate::logging::*;
use axum::{
    Router,
    extract::{Json, State},
    routing::post,
};
use ocid_common::ApiResponse;
use ocid_common::generation::{
    FaceSwapRequest, GeneratedImageResponse, GenerationParams, ImageEditRequest, ImagePayload,
    TextToImageRequest,
};
use std::sync::Arc;

fn path(sub: &str) -> String {
    format!("/generate/{sub}")
}

pub fn add_route(app: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    app.route(&path("text_to_image"), post(text_to_image))
        .route(&path("image_edit"), post(image_edit))
        .route(&path("face_swap"), post(face_swap))
}

const TEXT_TO_IMAGE_FRAMING: &str =
    "Based on the following request, generate and return only the photorealistic image data:";

const FACE_SWAP_PROMPT: &str = "Take the face from the first image and place it naturally onto \
     the person in the second image. Return only the resulting photorealistic image data.";

type GenerateResponse = Json<ApiResponse<GeneratedImageResponse, String>>;

async fn text_to_image(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextToImageRequest>,
) -> GenerateResponse {
    let log = DEFAULT.new(o!("function" => "text_to_image"));
    info!(log, "start");
    Json(run(&state, &log, GenerationParams::TextToImage(request)).await)
}

async fn image_edit(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ImageEditRequest>,
) -> GenerateResponse {
    let log = DEFAULT.new(o!(
        "function" => "image_edit",
        "images" => request.images.len(),
    ));
    info!(log, "start");
    Json(run(&state, &log, GenerationParams::ImageEdit(request)).await)
}

async fn face_swap(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FaceSwapRequest>,
) -> GenerateResponse {
    let log = DEFAULT.new(o!("function" => "face_swap"));
    info!(log, "start");
    Json(run(&state, &log, GenerationParams::FaceSwap(request)).await)
}

async fn run(
    state: &AppState,
    log: &Logger,
    params: GenerationParams,
) -> ApiResponse<GeneratedImageResponse, String> {
    if let Err(err) = params.validate() {
        info!(log, "Rejected request"; "error" => %err);
        return ApiResponse::Error(err.to_string());
    }

    let (prompt, images) = prepare(params);
    match state.gemini.generate(prompt, images).await {
        Ok(image) => ApiResponse::Success(GeneratedImageResponse { image }),
        Err(err) => {
            info!(log, "Failed to generate"; "error" => %err);
            ApiResponse::Error(err.to_string())
        }
    }
}

/// 各リクエストをGeminiに渡すプロンプトと画像の組に変換する
fn prepare(params: GenerationParams) -> (String, Vec<ImagePayload>) {
    match params {
        GenerationParams::TextToImage(request) => (
            format!("{} {}", TEXT_TO_IMAGE_FRAMING, request.prompt),
            Vec::new(),
        ),
        GenerationParams::ImageEdit(request) => (request.prompt, request.images),
        GenerationParams::FaceSwap(request) => (
            FACE_SWAP_PROMPT.to_string(),
            vec![request.source_image, request.target_image],
        ),
    }
}
