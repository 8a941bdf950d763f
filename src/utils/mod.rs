pub mod method_names;
