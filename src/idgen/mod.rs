pub mod codes;
pub mod controller;
pub mod index;
pub mod model;
pub mod repository;
pub mod service;
