pub mod propfind_object;
