pub mod handler;
mod server;
pub mod types;

#[cfg(test)]
mod tests;

pub use server::MCPServer;
