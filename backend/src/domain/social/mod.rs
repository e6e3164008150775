//! Social graph between members.

mod friendship;

pub use friendship::{Friendship, FriendshipStatus};
