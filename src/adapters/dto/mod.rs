pub mod concurrency_dto;
pub mod file_dto;
pub mod param_dto;
