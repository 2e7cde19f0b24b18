//! Integration Tests Module
//!
//! End-to-end runs from scripted feed pages to delivered messages.
