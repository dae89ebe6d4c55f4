pub mod identifier_allocator;
pub mod search_resolver;

pub use identifier_allocator::ClientIdAllocator;
pub use search_resolver::ClientSearchResolver;
