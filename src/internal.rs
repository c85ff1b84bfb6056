pub mod auth;
pub mod chunk_source;
pub mod entrance;
pub mod http;
pub mod object;
pub mod server;
pub mod streamer;
pub mod webdav;
