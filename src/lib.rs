//! # Gatehouse
//!
//! `gatehouse` is a small web portal: visitors sign up or log in with an
//! email and password, and authenticated members get access to a gated
//! members area. Credentials live in `PostgreSQL` (passwords stored as
//! Argon2 hashes), and authentication state lives in a server-side session
//! store keyed by a cookie-carried token.
//!
//! Only a keyed hash of the session token ever touches the database; the raw
//! token exists only in the client's cookie.

pub mod cli;
pub mod gatehouse;
