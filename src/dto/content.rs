use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Banner, BannerPosition, GalleryItem, Pdf, RecordStatus, Video};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BannerPayload {
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: BannerPosition,
    pub status: Option<RecordStatus>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GalleryPayload {
    pub title: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub alt_text: Option<String>,
    pub status: Option<RecordStatus>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VideoPayload {
    pub title: String,
    pub youtube_url: String,
    pub embed_code: Option<String>,
    pub description: Option<String>,
    pub status: Option<RecordStatus>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PdfPayload {
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_size: Option<i64>,
    pub status: Option<RecordStatus>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BannerList {
    pub items: Vec<Banner>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GalleryList {
    pub items: Vec<GalleryItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VideoList {
    pub items: Vec<Video>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PdfList {
    pub items: Vec<Pdf>,
}
