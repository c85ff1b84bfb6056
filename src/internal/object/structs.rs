pub mod object_descriptor;
pub mod remote_object;

// 重导出公共类型
pub use object_descriptor::ObjectDescriptor;
pub use remote_object::RemoteObject;
