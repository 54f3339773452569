use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub image_url: String,
    pub timestamp: String,
    pub text: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewMessage {
    pub text: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewMessageResponse {
    pub message: Message,
}

/// Body of `POST /users/add_like/{id}`. Older servers send nothing useful.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct LikeToggle {
    #[serde(default)]
    pub liked: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikeState {
    Liked,
    NotLiked,
}

impl LikeState {
    pub fn from_liked(liked: bool) -> Self {
        if liked { LikeState::Liked } else { LikeState::NotLiked }
    }

    pub fn flipped(self) -> Self {
        match self {
            LikeState::Liked => LikeState::NotLiked,
            LikeState::NotLiked => LikeState::Liked,
        }
    }
}
