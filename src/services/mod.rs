pub mod lookup;
pub mod proxy;
pub mod server;
