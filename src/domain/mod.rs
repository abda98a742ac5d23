pub mod models;

pub use models::{
    Competition, Participant, ParticipantId, ParticipantStatus, Rank, ResultSet,
};
