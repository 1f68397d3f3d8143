pub mod concurrency_controller;
pub mod file_controller;
pub mod health_controller;
pub mod model_controller;
pub mod param_controller;
