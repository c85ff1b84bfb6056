/// 默认分片大小：1MB
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;

/// 默认响应管道容量：64KB
pub const DEFAULT_PIPE_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// 每个分片的大小（字节），必须大于 0
    pub chunk_size: u64,
    /// 流式器与 HTTP 响应体之间内存管道的容量（字节）
    pub pipe_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            pipe_capacity: DEFAULT_PIPE_CAPACITY,
        }
    }
}

impl StreamConfig {
    /// 设置分片大小（字节）
    pub fn chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// 设置管道容量（字节）
    pub fn pipe_capacity(mut self, pipe_capacity: usize) -> Self {
        self.pipe_capacity = pipe_capacity;
        self
    }
}
