use reqwest::Method;
use scout_core::{Page, RecipeDetail, RecipeSummary, VideoPreview, VideoStatus};
use serde::Serialize;

use crate::client::Payload;
use crate::{ApiClient, ApiError};

#[derive(Serialize)]
struct VideoUrlBody<'a> {
    video_url: &'a str,
}

impl ApiClient {
    /// `POST {api}/videos/preview`: metadata and action type for a video URL.
    pub async fn preview_video(&self, video_url: &str) -> Result<VideoPreview, ApiError> {
        let url = self.api_url(&["videos", "preview"])?;
        let builder = self
            .request(Method::POST, url)
            .json(&VideoUrlBody { video_url });
        Ok(self.fetch::<Payload<VideoPreview>>(builder).await?.into_inner())
    }

    /// `POST {api}/videos`: stores the video and starts recipe generation.
    pub async fn create_video(&self, video_url: &str) -> Result<VideoPreview, ApiError> {
        let url = self.api_url(&["videos"])?;
        let builder = self
            .request(Method::POST, url)
            .json(&VideoUrlBody { video_url });
        Ok(self.fetch::<Payload<VideoPreview>>(builder).await?.into_inner())
    }

    /// `GET {api}/videos/{id}/status`.
    pub async fn video_status(&self, video_id: &str) -> Result<VideoStatus, ApiError> {
        let url = self.api_url(&["videos", video_id, "status"])?;
        let builder = self.request(Method::GET, url);
        Ok(self.fetch::<Payload<VideoStatus>>(builder).await?.into_inner())
    }

    /// `GET {api}/recipes?page=N`.
    pub async fn recipes(&self, page: u32) -> Result<Page<RecipeSummary>, ApiError> {
        let mut url = self.api_url(&["recipes"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.max(1).to_string());
        self.fetch(self.request(Method::GET, url)).await
    }

    /// `GET {api}/recipes/{slug}`.
    pub async fn recipe(&self, slug: &str) -> Result<RecipeDetail, ApiError> {
        let url = self.api_url(&["recipes", slug])?;
        let builder = self.request(Method::GET, url);
        Ok(self.fetch::<Payload<RecipeDetail>>(builder).await?.into_inner())
    }

    /// `GET {api}/user/library`: videos the signed-in user has submitted.
    pub async fn library(&self) -> Result<Vec<VideoPreview>, ApiError> {
        let url = self.api_url(&["user", "library"])?;
        let builder = self.request(Method::GET, url);
        Ok(self
            .fetch::<Payload<Vec<VideoPreview>>>(builder)
            .await?
            .into_inner())
    }

    /// `DELETE {api}/user/library/{video_id}`.
    pub async fn delete_library_video(&self, video_id: &str) -> Result<(), ApiError> {
        let url = self.api_url(&["user", "library", video_id])?;
        self.execute(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}
