//! Model ↔ Entity mappers

mod matches;
mod pool_member;
