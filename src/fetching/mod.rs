pub mod current_feed;
pub mod error;
pub mod latest;
pub mod measurements;
pub mod normalize;
pub mod query_cache;
pub mod raw;
pub mod source;
pub mod water_sim;

#[cfg(test)]
pub(crate) mod test_server;
