use std::path::Path;

use chrono::{DateTime, Utc};

use crate::internal::chunk_source::structs::file_chunk_source::FileChunkSource;
use crate::internal::http::structs::range_handler::RangeHandler;
use crate::internal::object::error::ResolveError;
use crate::internal::object::structs::object_descriptor::ObjectDescriptor;
use crate::internal::streamer::structs::stream_config::StreamConfig;
use crate::internal::streamer::structs::streamer::Streamer;

/// 读取本地文件元数据，得到对象描述
pub async fn get_local_object(
    path: impl AsRef<Path>,
) -> Result<ObjectDescriptor, ResolveError> {
    let path = path.as_ref();
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ResolveError::NotFound(path.display().to_string())
        } else {
            ResolveError::Io(e)
        }
    })?;

    if metadata.is_dir() {
        return Err(ResolveError::IsDir(path.display().to_string()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut descriptor =
        ObjectDescriptor::new(name, metadata.len(), path.display().to_string());
    descriptor.last_modified = metadata
        .modified()
        .ok()
        .map(|t| DateTime::<Utc>::from(t).fixed_offset());

    Ok(descriptor)
}

/// 本库主入口之一，通过本地文件系统打开对象并组装处理器
pub async fn open_local_object(
    path: impl AsRef<Path>,
    config: &StreamConfig,
) -> Result<RangeHandler<FileChunkSource>, ResolveError> {
    let path = path.as_ref();
    let descriptor = get_local_object(path).await?;

    let streamer =
        Streamer::with_config(FileChunkSource::new(path), config, descriptor.size)?;

    Ok(RangeHandler::from_descriptor(streamer, &descriptor)
        .with_pipe_capacity(config.pipe_capacity))
}
