//! 已读取的分片：数据及其在对象中的起始偏移。

use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 该分片在对象中的起始偏移（字节）
    offset: u64,
    /// 该分片的数据
    data: Bytes,
}

impl Chunk {
    pub fn new(offset: u64, data: Bytes) -> Self {
        Self { offset, data }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// 丢弃前 `n` 字节，偏移同步后移；`n` 超过长度时得到空分片。
    pub fn skip(self, n: u64) -> Self {
        let n = n.min(self.len());
        Self {
            offset: self.offset + n,
            data: self.data.slice(n as usize..),
        }
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}
