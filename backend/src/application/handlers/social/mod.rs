//! Friends handlers.

mod list_friends;
mod respond_friend_request;
mod send_friend_request;

pub use list_friends::{
    FriendActivity, FriendActivityHandler, FriendRequests, FriendView, ListFriendRequestsHandler,
    ListFriendsHandler, ACTIVITY_LIMIT,
};
pub use respond_friend_request::{
    CancelFriendRequestHandler, FriendRequestDecision, RemoveFriendHandler,
    RespondFriendRequestCommand, RespondFriendRequestHandler,
};
pub use send_friend_request::{
    FriendRequestOutcome, SendFriendRequestCommand, SendFriendRequestHandler,
    SendFriendRequestResult,
};
