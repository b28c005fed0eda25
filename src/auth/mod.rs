pub mod claims;
mod extractors;

pub use extractors::AuthUser;
#[cfg(test)]
pub(crate) use extractors::sign_for_tests;
