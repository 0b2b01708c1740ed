use serde::{Deserialize, Serialize};

use crate::domain::auth::users::PublicUser;
use crate::domain::ids::UserId;

/// Claims embedded in a signed session token.
///
/// `sub` travels as a string, as registered JWT claims expect; `iat` and
/// `exp` are Unix timestamps in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(with = "user_id_string")]
    pub sub: UserId,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn user_id(&self) -> UserId {
        self.sub
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: PublicUser,
}

mod user_id_string {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::domain::ids::UserId;

    pub fn serialize<S: Serializer>(id: &UserId, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&id.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<UserId, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse::<i64>().map(UserId::new).map_err(de::Error::custom)
    }
}
