pub mod serve_range;
