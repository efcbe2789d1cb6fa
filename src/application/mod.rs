/// Application layer - Collectors, use cases and DTOs
///
/// This layer contains the application logic that orchestrates
/// inventory services and coordinates with infrastructure through ports.
pub mod collectors;
pub mod dto;
pub mod factories;
pub mod use_cases;
