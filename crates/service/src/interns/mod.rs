//! Intern storage and read-side views.
//!
//! Handlers only see `InternService`; which backend sits behind the
//! `InternRepository` trait is decided at startup.

pub mod file;
pub mod memory;
pub mod repository;
pub mod service;

pub use file::JsonFileInternRepository;
pub use memory::MemoryInternRepository;
pub use repository::InternRepository;
pub use service::InternService;
