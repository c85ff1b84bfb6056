//! `Range` 请求头解析：只识别单段 `bytes=` 形式。
//!
//! 多段范围、非 `bytes` 单位、数字格式错误、`start > end` 都视为无法识别，
//! 由调用方回退为返回完整内容。

use thiserror::Error;

/// 解析得到的单段字节范围（尚未结合对象大小）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    /// `bytes=<start>-<end>`，两端均包含
    Bounded { start: u64, end: u64 },
    /// `bytes=<start>-`
    From { start: u64 },
    /// `bytes=-<length>`：对象最后 length 字节
    Suffix { length: u64 },
}

/// 结合对象大小后的闭区间 `[start, end]`，保证 `start <= end < total_size`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` 的值：`bytes start-end/total`
    pub fn content_range(&self, total_size: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, total_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("请求范围无法满足 (total_size={total_size})")]
pub struct RangeNotSatisfiable {
    pub total_size: u64,
}

impl RangeNotSatisfiable {
    /// 416 响应的 `Content-Range` 值：`bytes */total`
    pub fn content_range(&self) -> String {
        format!("bytes */{}", self.total_size)
    }
}

impl RangeSpec {
    /// 解析 `Range` 请求头；无法识别时返回 `None`。
    pub fn parse(header: &str) -> Option<Self> {
        let (unit, spec) = header.trim().split_once('=')?;
        if !unit.trim().eq_ignore_ascii_case("bytes") {
            return None;
        }
        let spec = spec.trim();
        if spec.contains(',') {
            return None;
        }

        let (start, end) = spec.split_once('-')?;
        let (start, end) = (start.trim(), end.trim());
        match (start.is_empty(), end.is_empty()) {
            (true, true) => None,
            (true, false) => Some(Self::Suffix {
                length: parse_position(end)?,
            }),
            (false, true) => Some(Self::From {
                start: parse_position(start)?,
            }),
            (false, false) => {
                let start = parse_position(start)?;
                let end = parse_position(end)?;
                (start <= end).then_some(Self::Bounded { start, end })
            }
        }
    }

    /// 结合对象大小得到闭区间：省略或超出的 end 截到 `total_size - 1`，
    /// 后缀长度超过对象大小时从 0 开始。
    pub fn resolve(
        self,
        total_size: u64,
    ) -> Result<ByteRange, RangeNotSatisfiable> {
        let not_satisfiable = RangeNotSatisfiable { total_size };
        let last = total_size.checked_sub(1).ok_or(not_satisfiable)?;

        let (start, end) = match self {
            Self::Bounded { start, end } => (start, end.min(last)),
            Self::From { start } => (start, last),
            Self::Suffix { length } => (total_size.saturating_sub(length), last),
        };

        if start >= total_size {
            return Err(not_satisfiable);
        }
        Ok(ByteRange { start, end })
    }
}

/// 只接受纯十进制数字；`u64::from_str` 会接受前导 `+`，这里不允许。
fn parse_position(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
