//! Secret Shopper Express: the marketing site's pages, its application
//! endpoint, and headless versions of the in-page components.

pub mod client;
pub mod components;
pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
