pub mod booking;
pub mod token;

pub use booking::BookingService;
pub use token::TokenAllocator;
