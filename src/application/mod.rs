// Application layer - Use cases over the reading source
pub mod dashboard_service;
pub mod metrics_calculator;
pub mod mock_series;
pub mod reading_repository;
pub mod streaming_service;
pub mod sync_service;
pub mod view_service;
