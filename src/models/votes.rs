use serde::Serialize;
use serde_repr::Serialize_repr;

#[derive(Serialize_repr, Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i64)]
pub enum VoteValue {
    Up = 1,
    Down = -1,
}

impl VoteValue {
    pub fn as_i64(self) -> i64 {
        self as i64
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(VoteValue::Up),
            -1 => Some(VoteValue::Down),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Vote {
    pub id: i64,
    pub quote_id: i64,
    pub voter_id: i64,
    pub value: i64,
}
