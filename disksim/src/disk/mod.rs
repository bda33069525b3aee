pub mod config;
pub mod descriptor;
pub mod disk_error;
pub mod disk_request;
pub mod disk_state;
pub mod schedulers;
pub mod sim_core;
pub mod stats;
pub mod timing;
pub mod window;
pub mod workload;
pub mod zone_table;
