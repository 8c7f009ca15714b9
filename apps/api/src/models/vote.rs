use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Stored `vote_value`: +1 for up, -1 for down.
    pub fn value(self) -> i16 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }
}

/// A row of the backend's `caption_votes` relation. One per (caption, profile).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionVoteRow {
    pub caption_id: i64,
    pub profile_id: Uuid,
    pub vote_value: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub caption_id: i64,
    pub upvotes: u32,
    pub downvotes: u32,
    pub score: i64,
}

impl VoteTally {
    pub fn from_votes(caption_id: i64, votes: &[CaptionVoteRow]) -> Self {
        let upvotes = votes.iter().filter(|v| v.vote_value > 0).count() as u32;
        let downvotes = votes.iter().filter(|v| v.vote_value < 0).count() as u32;
        Self {
            caption_id,
            upvotes,
            downvotes,
            score: i64::from(upvotes) - i64::from(downvotes),
        }
    }
}
