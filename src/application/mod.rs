mod update_service;

pub use update_service::UpdateService;
