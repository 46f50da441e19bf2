// lib.rs - Library exports for the server binary and integration tests

pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod models;
pub mod web;
