pub mod get_quota;
