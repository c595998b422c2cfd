pub mod graph;
pub mod cust_error;
pub mod vc_instance;
pub mod heuristics;
pub mod report;
pub mod bench;
pub mod config;
