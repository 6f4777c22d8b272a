pub mod analysis;
pub mod cipher;
pub mod config;
pub mod consts;
pub mod core_types;
pub mod corpus;
pub mod error;
pub mod input;
pub mod optimizer;
pub mod scorer;
