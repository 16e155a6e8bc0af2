pub mod asaas;
pub mod function;
pub mod submission;
