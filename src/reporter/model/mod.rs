pub mod status;
pub mod suite;
pub mod test_result;
