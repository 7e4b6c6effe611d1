pub mod whop;

pub use whop::WhopClient;
