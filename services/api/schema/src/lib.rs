//! Sea-ORM entities owned by the API service.

pub mod employees;
