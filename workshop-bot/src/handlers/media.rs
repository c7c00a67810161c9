//! Photos: echo of received photos, `/logo` (by URL) and `/icon` (upload).

use std::path::PathBuf;
use std::sync::Arc;

use chatbot_core::{HandlerError, Result};
use dispatcher::predicates::has_photo;
use dispatcher::{Command, DispatchContext, Reply};
use tracing::{info, warn};

pub const PHOTO_RECEIVED: &str = "Yeah, I got it!";
pub const PHOTO_PROBLEM: &str = "Houston, we have a problem!";

/// Downloads the largest variant of the received photo and returns its file id.
async fn fetch_largest_photo(ctx: &DispatchContext) -> Result<String> {
    let photo = ctx.update().largest_photo().ok_or(HandlerError::NoPhoto)?;
    let remote_path = match &photo.file_path {
        Some(path) => path.clone(),
        None => ctx.transport().resolve_file_path(&photo.file_id).await?,
    };
    let local = ctx.transport().download_file(&remote_path).await?;
    info!(
        user_id = ctx.user().id,
        file_id = %photo.file_id,
        local_path = %local.display(),
        "Photo downloaded"
    );
    Ok(photo.file_id.clone())
}

/// Confirms the photo and sends it back by file id. Download failures are answered, not raised.
pub async fn save_photo(ctx: DispatchContext) -> Result<()> {
    match fetch_largest_photo(&ctx).await {
        Ok(file_id) => {
            ctx.send(PHOTO_RECEIVED).await?;
            ctx.transport()
                .send_photo_by_file_id(ctx.chat_id(), &file_id)
                .await
        }
        Err(e) => {
            warn!(user_id = ctx.user().id, error = %e, "Could not fetch photo");
            ctx.send(PHOTO_PROBLEM).await
        }
    }
}

pub fn photo_reply() -> Reply {
    Reply::new(save_photo).when(has_photo)
}

pub fn logo_command(url: impl Into<String>) -> Command {
    let url: Arc<str> = url.into().into();
    Command::new("logo", move |ctx: DispatchContext| {
        let url = url.clone();
        async move { ctx.transport().send_photo_by_url(ctx.chat_id(), &url).await }
    })
    .with_info("send the logo")
}

pub fn icon_command(path: impl Into<PathBuf>) -> Command {
    let path: Arc<PathBuf> = Arc::new(path.into());
    Command::new("icon", move |ctx: DispatchContext| {
        let path = path.clone();
        async move { ctx.transport().send_photo_by_upload(ctx.chat_id(), &path).await }
    })
    .with_info("send the icon")
}
