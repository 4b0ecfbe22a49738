pub mod campaign;
pub mod customer;
pub mod date_range;
pub mod plan;
pub mod subscription;
