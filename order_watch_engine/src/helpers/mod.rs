mod message_chunks;

pub use message_chunks::split_message;
