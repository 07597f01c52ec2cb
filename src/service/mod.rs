pub mod attendance;
pub mod export;
pub mod reports;

#[cfg(test)]
pub(crate) mod test_support;
