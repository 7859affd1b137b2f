//! Unit tests for the public domain and analytics API

mod analytics_tests;
mod domain_tests;
