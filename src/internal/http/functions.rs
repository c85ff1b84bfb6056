pub mod stream_body;
