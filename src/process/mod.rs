pub mod child;
pub mod fd;
pub mod redirect;
pub mod status;
