pub mod dashboards;
pub mod enums;
pub mod shared;
pub mod usecases;
