pub mod authenticated;

pub use authenticated::Authenticated;
