pub mod limited_writer;
pub mod range_handler;
pub mod range_spec;
pub mod response_meta;

// 重导出公共类型
pub use limited_writer::LimitedWriter;
pub use range_handler::RangeHandler;
pub use range_spec::{ByteRange, RangeNotSatisfiable, RangeSpec};
pub use response_meta::{ObjectLabels, ResponseMeta};
