pub mod account;
pub mod analysis;
pub mod profile;

#[cfg(test)]
pub mod fixtures;
