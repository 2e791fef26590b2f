pub mod audit;
pub mod cli;
pub mod corpus;
pub mod report;
