pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod processing;
pub mod services;
