mod collections;

pub use collections::CollectionRepository;
