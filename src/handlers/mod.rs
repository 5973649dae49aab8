//! HTTP handlers

pub mod fallback;
pub mod health;
pub mod home;
pub mod info;
pub mod predict;

#[cfg(test)]
mod tests;
