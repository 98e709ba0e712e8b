//! Folder listing without loading. Each listed file is then loaded on its own, so one
//! broken file only costs that file.

use {
    bevy::{
        asset::io::{AssetReaderError, AssetSourceId, MissingAssetSourceError},
        prelude::*,
        tasks::{IoTaskPool, Task, futures_lite::StreamExt},
    },
    std::path::{Path, PathBuf},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ListingError {
    #[error(transparent)]
    MissingSource(#[from] MissingAssetSourceError),
    #[error(transparent)]
    Reader(#[from] AssetReaderError),
    #[error("{0} is not a folder")]
    NotAFolder(PathBuf),
}

/// Lists the files directly inside `dir`, sorted by path. A folder that cannot be
/// read is logged and listed as empty.
pub(crate) fn list_folder(asset_server: &AssetServer, dir: PathBuf) -> Task<Vec<PathBuf>> {
    let server = asset_server.clone();
    IoTaskPool::get().spawn(async move {
        match read_folder(&server, &dir).await {
            Ok(files) => {
                debug!(dir = %dir.display(), files = files.len(), "listed folder");
                files
            }
            Err(err) => {
                error!(dir = %dir.display(), %err, "could not list folder, treating it as empty");
                Vec::new()
            }
        }
    })
}

async fn read_folder(server: &AssetServer, dir: &Path) -> Result<Vec<PathBuf>, ListingError> {
    let reader = server.get_source(AssetSourceId::Default)?.reader();
    if !reader.is_directory(dir).await? {
        return Err(ListingError::NotAFolder(dir.to_path_buf()));
    }

    let mut entries = reader.read_directory(dir).await?;
    let mut files = Vec::new();
    while let Some(path) = entries.next().await {
        if !reader.is_directory(&path).await? {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
