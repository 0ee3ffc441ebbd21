#![allow(non_snake_case)]
/// request and response DTOs for the integral endpoint
pub mod dto;
/// error taxonomy of the HTTP boundary with status-code mapping
pub mod errors;
/// actix-web request handlers and route configuration
pub mod handlers;
/// the integral service: parse, integrate, explain, plot
pub mod service;
