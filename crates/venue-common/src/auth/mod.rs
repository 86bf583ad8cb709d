//! Identity resolution from bearer tokens

mod jwt;

pub use jwt::{Claims, JwtService};
