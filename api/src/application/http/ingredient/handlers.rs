pub mod get_ingredient;
