pub mod job;
pub mod resume;

#[cfg(test)]
pub mod fixtures;
