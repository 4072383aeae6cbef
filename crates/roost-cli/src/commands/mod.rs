pub mod fetch;
pub mod navigation;
pub mod session;
