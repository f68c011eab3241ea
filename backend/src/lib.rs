pub mod contest {
    pub mod controller;
    pub mod repository;
    pub mod usecase;

    pub use repository::{ContestRecordRepository, ContestRecordRepositoryImpl};
    pub use usecase::{ContestUseCase, ContestUseCaseImpl};
}
pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod openapi;
