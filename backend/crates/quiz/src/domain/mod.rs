//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Value objects (Operation, Pairing, Phase)
//! - Entities (Question, QuestionPool, QuizSession)
//! - Domain services (question pool generation)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
