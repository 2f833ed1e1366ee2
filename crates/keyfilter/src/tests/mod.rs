mod parse_bad;
pub mod utils;
